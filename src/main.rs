// region:    --- Imports
use auction_marketplace::config::AppConfig;
use auction_marketplace::handlers::{self, AppState};
use auction_marketplace::scheduler::AuctionScheduler;
use auction_marketplace::state::Marketplace;
use auction_marketplace::store::{FileStore, LocalStore};
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    info!("{:<12} --> 설정: {:?}", "Main", config);

    // 저장소 생성
    let store = if config.store_in_memory {
        LocalStore::in_memory()
    } else {
        match FileStore::open(&config.store_path) {
            Ok(file_store) => LocalStore::new(file_store),
            Err(e) => {
                error!("{:<12} --> 저장소 열기 실패: {:?}", "Main", e);
                return Err(e.into());
            }
        }
    };

    // 상태 불러오기 (비어 있으면 초기 데이터로 채움)
    let market = match Marketplace::open(store) {
        Ok(market) => market.into_shared(),
        Err(e) => {
            error!("{:<12} --> 저장소 초기화 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> 저장소 초기화 성공", "Main");

    // 종료된 경매 감지
    let _scheduler = AuctionScheduler::new(market.clone(), config.countdown_tick).start();

    let routes_all = handlers::routes(AppState {
        market,
        countdown_tick: config.countdown_tick,
    });

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
