/// 입찰 관련 커맨드 처리
/// 1. 최소 입찰가 계산
/// 2. 입찰 검증 및 적용
// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::bidding::model::{Amount, Auction, AuctionId, AuctionInfo, BidRecord};
use crate::error::MarketError;
use crate::state::Marketplace;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: AuctionId,
    pub amount: Amount,
}

/// 다음 입찰에 필요한 최소 금액
pub fn min_bid(info: &AuctionInfo) -> Amount {
    info.current_bid + info.increment
}

/// 입찰 금액 검증
pub fn validate_bid(info: &AuctionInfo, amount: Amount) -> Result<(), MarketError> {
    let min_bid = min_bid(info);
    if !amount.is_finite() || amount < min_bid {
        return Err(MarketError::BidTooLow { amount, min_bid });
    }
    Ok(())
}

/// 입찰 이력에 쓰이는 시각 문자열 (현지 시각)
pub fn format_bid_date(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// 경매에 입찰 적용. 검증에 실패하면 경매는 바뀌지 않는다.
pub fn apply_bid(
    auction: &mut Auction,
    bidder: &str,
    amount: Amount,
    now: DateTime<Utc>,
) -> Result<BidRecord, MarketError> {
    validate_bid(&auction.auction_info, amount)?;

    let record = BidRecord {
        user: bidder.to_owned(),
        amount,
        date: format_bid_date(now),
    };
    auction.auction_info.current_bid = amount;
    auction.bid_history.insert(0, record.clone());
    Ok(record)
}

/// 1. 입찰
pub fn handle_place_bid(
    cmd: PlaceBidCommand,
    market: &mut Marketplace,
    now: DateTime<Utc>,
) -> Result<AuctionEvent, MarketError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    let Marketplace {
        store,
        session,
        auctions,
    } = market;

    let bidder = session.require()?.name.clone();

    let result = auctions.update(store, cmd.auction_id, |auction| {
        apply_bid(auction, &bidder, cmd.amount, now)
    });

    match result {
        Ok(record) => {
            info!(
                "{:<12} --> 입찰 성공: 경매 {} 현재 가격 {}",
                "Command", cmd.auction_id, record.amount
            );
            Ok(AuctionEvent::BidPlaced {
                auction_id: cmd.auction_id,
                bidder: record.user,
                bid_amount: record.amount,
                timestamp: now,
            })
        }
        Err(e) => {
            warn!("{:<12} --> 입찰 실패: {}", "Command", e);
            Err(e)
        }
    }
}
// endregion: --- Commands
