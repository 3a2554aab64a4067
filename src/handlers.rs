// region:    --- Imports
use crate::account::{self, LoginCommand, RegisterCommand, UpdateProfileCommand};
use crate::auction::commands::{
    handle_announce as command_handle_announce, handle_delete, handle_toggle_watchlist,
    AnnounceCommand,
};
use crate::bidding::commands::{handle_place_bid, min_bid, PlaceBidCommand};
use crate::bidding::countdown::parse_end_date;
use crate::bidding::model::{Amount, AuctionId, User};
use crate::error::MarketError;
use crate::query::handlers as query;
use crate::query::queries::AuctionQuery;
use crate::scheduler::CountdownTicker;
use crate::state::SharedMarketplace;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub market: SharedMarketplace,
    pub countdown_tick: Duration,
}

/// 입찰 요청 본문
#[derive(Debug, Deserialize)]
pub struct BidRequest {
    pub amount: Amount,
}

/// 응답용 사용자 정보 (비밀번호 제외)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub avatar: String,
    pub member_since: i32,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            cpf: user.cpf,
            avatar: user.avatar,
            member_since: user.member_since,
        }
    }
}
// endregion: --- App State

// region:    --- Routes
pub fn routes(state: AppState) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", get(handle_get_categories))
        .route("/auctions", get(handle_list_auctions).post(handle_announce))
        .route(
            "/auctions/:id",
            get(handle_get_auction).delete(handle_delete_auction),
        )
        .route("/auctions/:id/status", get(handle_get_auction_status))
        .route("/auctions/:id/countdown", get(handle_countdown))
        .route(
            "/auctions/:id/bids",
            get(handle_get_bid_history).post(handle_bid),
        )
        .route("/my-auctions", get(handle_get_my_auctions))
        .route("/watchlist", get(handle_get_watchlist))
        .route("/watchlist/:id", post(handle_toggle_watch))
        .route("/users", post(handle_register))
        .route("/users/me", patch(handle_update_profile))
        .route(
            "/session",
            get(handle_get_session)
                .post(handle_login)
                .delete(handle_logout),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 20)) // 이미지가 data URL로 들어오므로 20MB
        .with_state(state)
}
// endregion: --- Routes

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_bid(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
    Json(req): Json<BidRequest>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    let cmd = PlaceBidCommand {
        auction_id,
        amount: req.amount,
    };
    let event = handle_place_bid(cmd, &mut market, Utc::now())?;
    let auction = market.auctions().get(auction_id)?;

    Ok(Json(serde_json::json!({
        "message": "입찰이 성공적으로 처리되었습니다.",
        "currentBid": auction.auction_info.current_bid,
        "minBid": min_bid(&auction.auction_info),
        "event": event,
    })))
}

/// 경매 등록
pub async fn handle_announce(
    State(state): State<AppState>,
    Json(cmd): Json<AnnounceCommand>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    let (auction, _) = command_handle_announce(cmd, &mut market, Utc::now())?;
    Ok((StatusCode::CREATED, Json(auction)))
}

/// 경매 삭제
pub async fn handle_delete_auction(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    handle_delete(auction_id, &mut market, Utc::now())?;
    Ok(StatusCode::NO_CONTENT)
}

/// 관심 목록 토글
pub async fn handle_toggle_watch(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    Ok(Json(handle_toggle_watchlist(auction_id, &mut market)?))
}

/// 회원 가입
pub async fn handle_register(
    State(state): State<AppState>,
    Json(cmd): Json<RegisterCommand>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    let user = account::register(cmd, &mut market, Utc::now())?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

/// 프로필 수정
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(cmd): Json<UpdateProfileCommand>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    let user = account::update_profile(cmd, &mut market)?;
    Ok(Json(UserProfile::from(user)))
}

/// 로그인
pub async fn handle_login(
    State(state): State<AppState>,
    Json(cmd): Json<LoginCommand>,
) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    let user = account::login(cmd, &mut market)?;
    Ok(Json(UserProfile::from(user)))
}

/// 로그아웃
pub async fn handle_logout(State(state): State<AppState>) -> Result<impl IntoResponse, MarketError> {
    let mut market = state.market.lock().await;
    account::logout(&mut market)?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 카테고리 조회
pub async fn handle_get_categories() -> impl IntoResponse {
    info!("{:<12} --> 카테고리 조회", "HandlerQuery");
    Json(query::get_categories())
}

/// 경매 목록 조회
pub async fn handle_list_auctions(
    State(state): State<AppState>,
    Query(filter): Query<AuctionQuery>,
) -> impl IntoResponse {
    let market = state.market.lock().await;
    Json(query::list_auctions(&market, &filter))
}

/// 경매 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<impl IntoResponse, MarketError> {
    let market = state.market.lock().await;
    Ok(Json(query::get_auction(&market, auction_id)?))
}

/// 경매 상태 조회
pub async fn handle_get_auction_status(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<impl IntoResponse, MarketError> {
    let market = state.market.lock().await;
    Ok(Json(query::get_auction_status(
        &market,
        auction_id,
        Utc::now(),
    )?))
}

/// 카운트다운 스트림 (SSE). 종료 값을 보낸 뒤 스트림이 끝난다.
pub async fn handle_countdown(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, MarketError> {
    info!(
        "{:<12} --> 카운트다운 구독 id: {}",
        "HandlerQuery", auction_id
    );
    let end = {
        let market = state.market.lock().await;
        parse_end_date(&market.auctions().get(auction_id)?.end_date)?
    };

    let ticker = CountdownTicker::start(end, state.countdown_tick);
    let stream = stream::unfold(ticker, |mut ticker| async move {
        let countdown = ticker.next_tick().await?;
        let event = Event::default().event("countdown").json_data(countdown);
        Some((event, ticker))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(state): State<AppState>,
    Path(auction_id): Path<AuctionId>,
) -> Result<impl IntoResponse, MarketError> {
    let market = state.market.lock().await;
    Ok(Json(query::get_bid_history(&market, auction_id)?))
}

/// 내 경매 조회
pub async fn handle_get_my_auctions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketError> {
    let market = state.market.lock().await;
    Ok(Json(query::get_my_auctions(&market)?))
}

/// 관심 경매 조회
pub async fn handle_get_watchlist(State(state): State<AppState>) -> impl IntoResponse {
    let market = state.market.lock().await;
    Json(query::get_watched_auctions(&market))
}

/// 현재 로그인 사용자 (없으면 null)
pub async fn handle_get_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("{:<12} --> 세션 조회", "HandlerQuery");
    let market = state.market.lock().await;
    Json(market.session().current().cloned().map(UserProfile::from))
}

// endregion: --- Query Handlers
