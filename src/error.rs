//! 마켓플레이스 에러 타입
//!
//! 모든 도메인 명령은 `MarketError`를 반환하고, HTTP 계층에서는
//! `{"error": ..., "code": ...}` 형태의 JSON으로 변환된다.

// region:    --- Imports
use crate::bidding::model::{Amount, AuctionId};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Store Error
/// 로컬 저장소 에러
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("저장소 입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("저장소 직렬화 오류: {0}")]
    Serialize(#[from] serde_json::Error),
}
// endregion: --- Store Error

// region:    --- Market Error
/// 도메인 명령 에러
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("로그인이 필요합니다.")]
    NotAuthenticated,

    #[error("입찰 금액 {amount}이(가) 최소 입찰가 {min_bid}보다 낮습니다.")]
    BidTooLow { amount: Amount, min_bid: Amount },

    #[error("경매를 찾을 수 없습니다: {0}")]
    AuctionNotFound(AuctionId),

    #[error("이메일 또는 비밀번호가 올바르지 않습니다.")]
    InvalidCredentials,

    #[error("이미 가입된 이메일입니다.")]
    EmailTaken,

    #[error("유효한 이메일을 입력해 주세요.")]
    InvalidEmail,

    #[error("유효하지 않은 CPF입니다.")]
    InvalidCpf,

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    #[error("잘못된 경매 정보입니다: {0}")]
    InvalidListing(String),

    #[error("잘못된 종료 시각입니다: {0}")]
    InvalidEndDate(String),

    #[error("판매자만 경매를 삭제할 수 있습니다.")]
    NotSeller,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MarketError {
    /// 클라이언트에 전달되는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::NotAuthenticated => "NOT_AUTHENTICATED",
            MarketError::BidTooLow { .. } => "BID_TOO_LOW",
            MarketError::AuctionNotFound(_) => "AUCTION_NOT_FOUND",
            MarketError::InvalidCredentials => "INVALID_CREDENTIALS",
            MarketError::EmailTaken => "EMAIL_TAKEN",
            MarketError::InvalidEmail => "INVALID_EMAIL",
            MarketError::InvalidCpf => "INVALID_CPF",
            MarketError::PasswordMismatch => "PASSWORD_MISMATCH",
            MarketError::InvalidListing(_) => "INVALID_LISTING",
            MarketError::InvalidEndDate(_) => "INVALID_END_DATE",
            MarketError::NotSeller => "NOT_SELLER",
            MarketError::Store(_) => "STORE_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            MarketError::NotAuthenticated | MarketError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            MarketError::NotSeller => StatusCode::FORBIDDEN,
            MarketError::AuctionNotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        if let MarketError::BidTooLow { min_bid, .. } = &self {
            body["minBid"] = serde_json::json!(min_bid);
        }

        (self.status(), Json(body)).into_response()
    }
}

pub type MarketResult<T> = Result<T, MarketError>;
// endregion: --- Market Error
