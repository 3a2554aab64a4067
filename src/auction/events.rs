use crate::bidding::model::{Amount, AuctionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum AuctionEvent {
    // 입찰 이벤트
    BidPlaced {
        auction_id: AuctionId,
        bidder: String,
        bid_amount: Amount,
        timestamp: DateTime<Utc>,
    },
    // 경매 등록 이벤트
    AuctionListed {
        auction_id: AuctionId,
        seller_id: UserId,
        timestamp: DateTime<Utc>,
    },
    // 경매 삭제 이벤트
    AuctionDeleted {
        auction_id: AuctionId,
        timestamp: DateTime<Utc>,
    },
    // 관심 목록 변경 이벤트
    WatchlistToggled {
        auction_id: AuctionId,
        watched: bool,
    },
}
