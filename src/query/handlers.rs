// region:    --- Imports
use super::queries::{AuctionQuery, AuctionStatus};
use crate::bidding::commands::min_bid;
use crate::bidding::countdown::{parse_end_date, winner, Countdown};
use crate::bidding::model::{Auction, AuctionId, BidRecord, Category};
use crate::error::MarketError;
use crate::state::Marketplace;
use crate::store::seed::CATEGORIES;
use chrono::{DateTime, Utc};
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 경매 목록 조회 (저장 순서 유지)
pub fn list_auctions(market: &Marketplace, query: &AuctionQuery) -> Vec<Auction> {
    info!("{:<12} --> 경매 목록 조회: {:?}", "Query", query);
    market
        .auctions()
        .all()
        .iter()
        .filter(|auction| query.matches(auction))
        .cloned()
        .collect()
}

/// 경매 조회
pub fn get_auction(market: &Marketplace, auction_id: AuctionId) -> Result<Auction, MarketError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    market.auctions().get(auction_id).cloned()
}

/// 입찰 이력 조회 (최신순)
pub fn get_bid_history(
    market: &Marketplace,
    auction_id: AuctionId,
) -> Result<Vec<BidRecord>, MarketError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", auction_id);
    Ok(market.auctions().get(auction_id)?.bid_history.clone())
}

/// 내 경매 조회
pub fn get_my_auctions(market: &Marketplace) -> Result<Vec<Auction>, MarketError> {
    let user_id = market.session().require()?.id;
    info!("{:<12} --> 내 경매 조회 user: {}", "Query", user_id);
    Ok(market
        .auctions()
        .all()
        .iter()
        .filter(|auction| auction.seller_info.id == user_id)
        .cloned()
        .collect())
}

/// 관심 경매 조회
pub fn get_watched_auctions(market: &Marketplace) -> Vec<Auction> {
    info!("{:<12} --> 관심 경매 조회", "Query");
    market
        .auctions()
        .all()
        .iter()
        .filter(|auction| market.auctions().is_watched(auction.id))
        .cloned()
        .collect()
}

/// 카테고리 조회
pub fn get_categories() -> &'static [Category] {
    CATEGORIES
}

/// 경매 상태 계산
pub fn get_auction_status(
    market: &Marketplace,
    auction_id: AuctionId,
    now: DateTime<Utc>,
) -> Result<AuctionStatus, MarketError> {
    info!("{:<12} --> 경매 상태 조회 id: {}", "Query", auction_id);
    let auction = market.auctions().get(auction_id)?;
    auction_status(auction, now)
}

pub fn auction_status(auction: &Auction, now: DateTime<Utc>) -> Result<AuctionStatus, MarketError> {
    let countdown = Countdown::between(now, parse_end_date(&auction.end_date)?);
    Ok(AuctionStatus {
        countdown,
        min_bid: min_bid(&auction.auction_info),
        winner: winner(&countdown, &auction.bid_history).map(str::to_owned),
    })
}

// endregion: --- Query Handlers
