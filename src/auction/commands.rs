/// 경매 관련 커맨드 처리
/// 1. 경매 등록
/// 2. 경매 삭제
/// 3. 관심 목록 토글
// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::bidding::countdown::parse_end_date;
use crate::bidding::model::{
    Amount, Auction, AuctionId, AuctionInfo, MemberSince, SellerInfo,
};
use crate::error::MarketError;
use crate::state::Marketplace;
use crate::store::seed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
// endregion: --- Imports

// 경매당 최대 이미지 수
const MAX_IMAGES: usize = 9;
const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400/282c39/FFF?text=Imagem";

// region:    --- Commands
/// 경매 등록 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnnounceCommand {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
    pub start_bid: Amount,
    pub increment: Amount,
    pub end_date: String,
}

/// 1. 경매 등록. 새 경매는 컬렉션 맨 앞에 들어간다.
pub fn handle_announce(
    cmd: AnnounceCommand,
    market: &mut Marketplace,
    now: DateTime<Utc>,
) -> Result<(Auction, AuctionEvent), MarketError> {
    let seller = market.session.require()?.clone();
    info!(
        "{:<12} --> 경매 등록 요청: {:?} (seller={})",
        "Command", cmd.title, seller.id
    );

    if !cmd.start_bid.is_finite() || cmd.start_bid < 0.0 {
        return Err(MarketError::InvalidListing(
            "시작가는 0 이상이어야 합니다.".to_string(),
        ));
    }
    if !cmd.increment.is_finite() || cmd.increment <= 0.0 {
        return Err(MarketError::InvalidListing(
            "입찰 단위는 0보다 커야 합니다.".to_string(),
        ));
    }
    if seed::category(&cmd.category).is_none() {
        return Err(MarketError::InvalidListing(format!(
            "알 수 없는 카테고리: {}",
            cmd.category
        )));
    }
    parse_end_date(&cmd.end_date)?;

    let mut images = cmd.images;
    images.truncate(MAX_IMAGES);
    if images.is_empty() {
        images.push(PLACEHOLDER_IMAGE.to_string());
    }

    let auction = Auction {
        id: market.auctions.next_id(now.timestamp_millis()),
        title: cmd.title,
        description: cmd.description,
        category: cmd.category,
        images,
        details: cmd.details,
        auction_info: AuctionInfo {
            current_bid: cmd.start_bid,
            increment: cmd.increment,
            start_bid: cmd.start_bid,
        },
        end_date: cmd.end_date,
        bid_history: Vec::new(),
        seller_info: SellerInfo {
            id: seller.id,
            name: seller.name,
            avatar: seller.avatar,
            member_since: MemberSince::Year(seller.member_since),
        },
    };
    market.auctions.insert_front(&market.store, auction.clone())?;

    info!("{:<12} --> 경매 등록 성공: id={}", "Command", auction.id);
    let event = AuctionEvent::AuctionListed {
        auction_id: auction.id,
        seller_id: seller.id,
        timestamp: now,
    };
    Ok((auction, event))
}

/// 2. 경매 삭제 (판매자 본인만)
pub fn handle_delete(
    auction_id: AuctionId,
    market: &mut Marketplace,
    now: DateTime<Utc>,
) -> Result<AuctionEvent, MarketError> {
    let user_id = market.session.require()?.id;
    info!(
        "{:<12} --> 경매 삭제 요청: id={} (user={})",
        "Command", auction_id, user_id
    );

    if market.auctions.get(auction_id)?.seller_info.id != user_id {
        return Err(MarketError::NotSeller);
    }
    market.auctions.remove(&market.store, auction_id)?;

    Ok(AuctionEvent::AuctionDeleted {
        auction_id,
        timestamp: now,
    })
}

/// 3. 관심 목록 토글
pub fn handle_toggle_watchlist(
    auction_id: AuctionId,
    market: &mut Marketplace,
) -> Result<AuctionEvent, MarketError> {
    market.auctions.get(auction_id)?;
    let watched = market.auctions.toggle_watch(&market.store, auction_id)?;
    info!(
        "{:<12} --> 관심 목록 변경: id={} watched={}",
        "Command", auction_id, watched
    );

    Ok(AuctionEvent::WatchlistToggled {
        auction_id,
        watched,
    })
}
// endregion: --- Commands
