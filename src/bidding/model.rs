use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type AuctionId = i64;
pub type UserId = i64;
pub type Amount = f64;

// 경매 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: AuctionId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub images: Vec<String>,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
    pub auction_info: AuctionInfo,
    pub end_date: String,
    /// 최신 입찰이 맨 앞
    #[serde(default)]
    pub bid_history: Vec<BidRecord>,
    pub seller_info: SellerInfo,
}

impl Auction {
    /// 현재 최고 입찰자 (입찰 이력의 맨 앞)
    pub fn leading_bidder(&self) -> Option<&str> {
        self.bid_history.first().map(|bid| bid.user.as_str())
    }
}

// 입찰 정보
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionInfo {
    pub current_bid: Amount,
    pub increment: Amount,
    pub start_bid: Amount,
}

// 입찰 이력 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    /// 입찰자 표시 이름 (사용자 id가 아님)
    pub user: String,
    pub amount: Amount,
    pub date: String,
}

// 판매자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    pub member_since: MemberSince,
}

/// 판매자 가입 시기. 등록된 경매는 연도, 초기 데이터는 문구를 가진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberSince {
    Year(i32),
    Label(String),
}

// 사용자 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub avatar: String,
    pub member_since: i32,
}

// 카테고리 모델
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
}
