use crate::bidding::model::{Amount, Auction};
use crate::bidding::countdown::Countdown;
use serde::{Deserialize, Serialize};

/// 경매 목록 필터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionQuery {
    /// 카테고리 id (정확히 일치)
    pub category: Option<String>,
    /// 제목/설명 검색어 (대소문자 무시)
    pub q: Option<String>,
}

impl AuctionQuery {
    pub fn matches(&self, auction: &Auction) -> bool {
        let matches_category = self
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .map_or(true, |category| auction.category == category);

        let matches_search = self
            .q
            .as_deref()
            .filter(|q| !q.is_empty())
            .map_or(true, |q| {
                let q = q.to_lowercase();
                auction.title.to_lowercase().contains(&q)
                    || auction.description.to_lowercase().contains(&q)
            });

        matches_category && matches_search
    }
}

/// 경매 진행 상태 (매번 계산되며 저장되지 않음)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionStatus {
    pub countdown: Countdown,
    pub min_bid: Amount,
    pub winner: Option<String>,
}
