use crate::bidding::model::{Auction, AuctionId};
use crate::error::{MarketError, StoreError};
use crate::store::{LocalStore, AUCTIONS_KEY, WATCHLIST_KEY};

/// 경매 컬렉션과 관심 목록
#[derive(Debug, Clone, Default)]
pub struct AuctionState {
    auctions: Vec<Auction>,
    watchlist: Vec<AuctionId>,
}

impl AuctionState {
    pub fn load(store: &LocalStore) -> Self {
        Self {
            auctions: store.get_data(AUCTIONS_KEY, Vec::new()),
            watchlist: store.get_data(WATCHLIST_KEY, Vec::new()),
        }
    }

    pub fn all(&self) -> &[Auction] {
        &self.auctions
    }

    pub fn get(&self, id: AuctionId) -> Result<&Auction, MarketError> {
        self.auctions
            .iter()
            .find(|auction| auction.id == id)
            .ok_or(MarketError::AuctionNotFound(id))
    }

    /// 하나의 경매를 수정하고 컬렉션 전체를 저장한다.
    /// `f`가 실패하면 메모리와 저장소 모두 그대로 남는다.
    pub fn update<T>(
        &mut self,
        store: &LocalStore,
        id: AuctionId,
        f: impl FnOnce(&mut Auction) -> Result<T, MarketError>,
    ) -> Result<T, MarketError> {
        let index = self
            .auctions
            .iter()
            .position(|auction| auction.id == id)
            .ok_or(MarketError::AuctionNotFound(id))?;

        let mut updated = self.auctions[index].clone();
        let output = f(&mut updated)?;

        let previous = std::mem::replace(&mut self.auctions[index], updated);
        if let Err(e) = store.set_data(AUCTIONS_KEY, &self.auctions) {
            self.auctions[index] = previous;
            return Err(e.into());
        }
        Ok(output)
    }

    /// 새 경매를 맨 앞에 추가
    pub fn insert_front(&mut self, store: &LocalStore, auction: Auction) -> Result<(), StoreError> {
        self.auctions.insert(0, auction);
        if let Err(e) = store.set_data(AUCTIONS_KEY, &self.auctions) {
            self.auctions.remove(0);
            return Err(e);
        }
        Ok(())
    }

    pub fn remove(&mut self, store: &LocalStore, id: AuctionId) -> Result<Auction, MarketError> {
        let index = self
            .auctions
            .iter()
            .position(|auction| auction.id == id)
            .ok_or(MarketError::AuctionNotFound(id))?;

        let removed = self.auctions.remove(index);
        if let Err(e) = store.set_data(AUCTIONS_KEY, &self.auctions) {
            self.auctions.insert(index, removed);
            return Err(e.into());
        }
        Ok(removed)
    }

    /// 사용 중이지 않은 경매 id. 생성 시각(ms)이 겹치면 가장 큰 id 다음 값.
    pub fn next_id(&self, candidate: AuctionId) -> AuctionId {
        if self.auctions.iter().any(|auction| auction.id == candidate) {
            self.auctions
                .iter()
                .map(|auction| auction.id)
                .max()
                .map_or(candidate, |max| max + 1)
        } else {
            candidate
        }
    }

    pub fn watchlist(&self) -> &[AuctionId] {
        &self.watchlist
    }

    pub fn is_watched(&self, id: AuctionId) -> bool {
        self.watchlist.contains(&id)
    }

    /// 관심 목록 토글. 토글 후 관심 여부를 돌려준다.
    pub fn toggle_watch(&mut self, store: &LocalStore, id: AuctionId) -> Result<bool, StoreError> {
        let mut watchlist = self.watchlist.clone();
        let watched = if let Some(index) = watchlist.iter().position(|watched| *watched == id) {
            watchlist.remove(index);
            false
        } else {
            watchlist.push(id);
            true
        };

        store.set_data(WATCHLIST_KEY, &watchlist)?;
        self.watchlist = watchlist;
        Ok(watched)
    }
}
