//! 도메인 상태 컨테이너
//!
//! 세션과 경매 컬렉션을 메모리에 들고 있으며, 모든 변경은 즉시 로컬
//! 저장소에 기록된다. 명령 함수들은 `Marketplace`를 명시적으로 넘겨받는다.

// region:    --- Imports
use crate::error::StoreError;
use crate::store::LocalStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

mod auctions;
mod session;

pub use self::auctions::AuctionState;
pub use self::session::SessionState;
// endregion: --- Imports

/// 핸들러 사이에서 공유되는 마켓플레이스
pub type SharedMarketplace = Arc<Mutex<Marketplace>>;

// region:    --- Marketplace
pub struct Marketplace {
    pub(crate) store: LocalStore,
    pub(crate) session: SessionState,
    pub(crate) auctions: AuctionState,
}

impl Marketplace {
    /// 저장소 초기화 후 상태 불러오기
    pub fn open(store: LocalStore) -> Result<Self, StoreError> {
        store.initialize()?;
        let session = SessionState::load(&store);
        let auctions = AuctionState::load(&store);
        info!(
            "{:<12} --> 상태 불러오기: 경매 {}건, 관심 {}건, 로그인 {}",
            "State",
            auctions.all().len(),
            auctions.watchlist().len(),
            session.current().is_some()
        );

        Ok(Self {
            store,
            session,
            auctions,
        })
    }

    pub fn into_shared(self) -> SharedMarketplace {
        Arc::new(Mutex::new(self))
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn auctions(&self) -> &AuctionState {
        &self.auctions
    }
}
// endregion: --- Marketplace

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::Auction;
    use crate::store::seed;

    #[test]
    fn open_seeds_empty_store() {
        let market = Marketplace::open(LocalStore::in_memory()).unwrap();

        assert_eq!(market.auctions().all(), seed::initial_auctions().as_slice());
        assert!(market.auctions().watchlist().is_empty());
        assert!(market.session().current().is_none());
    }

    #[test]
    fn auction_collection_round_trips_in_order() {
        let store = LocalStore::in_memory();
        let mut market = Marketplace::open(store.clone()).unwrap();

        let mut second = seed::initial_auctions().remove(0);
        second.id = 2;
        second.title = "Relógio antigo".to_string();
        let mut third = second.clone();
        third.id = 3;
        third.bid_history.clear();

        market.auctions.insert_front(&store, second).unwrap();
        market.auctions.insert_front(&store, third).unwrap();
        let before: Vec<Auction> = market.auctions().all().to_vec();

        let reloaded = Marketplace::open(store).unwrap();
        assert_eq!(reloaded.auctions().all(), before.as_slice());
        assert_eq!(
            reloaded
                .auctions()
                .all()
                .iter()
                .map(|auction| auction.id)
                .collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn next_id_avoids_collisions() {
        let market = Marketplace::open(LocalStore::in_memory()).unwrap();

        assert_eq!(market.auctions().next_id(1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(market.auctions().next_id(1), 2);
    }
}
