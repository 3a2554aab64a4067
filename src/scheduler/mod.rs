/// 경매 카운트다운 스케줄러
/// 1. 경매별 카운트다운 티커 (SSE 스트림 한 개당 하나)
/// 2. 종료된 경매를 감지해 낙찰자를 기록하는 백그라운드 스윕
// region:    --- Imports
use crate::bidding::countdown::Countdown;
use crate::bidding::model::{Auction, AuctionId};
use crate::query::handlers::auction_status;
use crate::state::SharedMarketplace;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

// endregion: --- Imports

// interval은 0 주기를 허용하지 않는다
const MIN_PERIOD: Duration = Duration::from_millis(1);

// region:    --- Countdown Ticker
/// 주기적으로 남은 시간을 다시 계산해 최신 값을 발행한다.
/// 종료 값을 한 번 발행하면 더 이상 계산하지 않고, drop 시 태스크를 중단한다.
pub struct CountdownTicker {
    rx: watch::Receiver<Countdown>,
    handle: JoinHandle<()>,
    primed: bool,
}

impl CountdownTicker {
    pub fn start(end: DateTime<Utc>, period: Duration) -> Self {
        let initial = Countdown::between(Utc::now(), end);
        let (tx, rx) = watch::channel(initial);
        let period = period.max(MIN_PERIOD);

        let handle = tokio::spawn(async move {
            if initial.is_finished {
                return;
            }
            let mut ticker = interval(period);
            // 첫 tick은 즉시 완료된다
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let countdown = Countdown::between(Utc::now(), end);
                if tx.send(countdown).is_err() || countdown.is_finished {
                    break;
                }
            }
            debug!("{:<12} --> 카운트다운 티커 종료", "Scheduler");
        });

        Self {
            rx,
            handle,
            primed: false,
        }
    }

    /// 가장 최근에 발행된 값
    pub fn current(&self) -> Countdown {
        *self.rx.borrow()
    }

    /// 첫 호출은 시작 시점의 값을 바로 돌려주고, 이후에는 다음 발행을 기다린다.
    /// 종료 값을 돌려준 뒤에는 `None`.
    pub async fn next_tick(&mut self) -> Option<Countdown> {
        if !self.primed {
            self.primed = true;
            return Some(*self.rx.borrow_and_update());
        }
        if self.rx.borrow().is_finished {
            return None;
        }
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
// endregion: --- Countdown Ticker

// region:    --- Auction Scheduler
/// 종료된 경매 감지 스케줄러
pub struct AuctionScheduler {
    market: SharedMarketplace,
    period: Duration,
}

impl AuctionScheduler {
    pub fn new(market: SharedMarketplace, period: Duration) -> Self {
        Self {
            market,
            period: period.max(MIN_PERIOD),
        }
    }

    /// 스케줄러 시작
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut finished = HashSet::new();
            let mut ticker = interval(self.period);
            loop {
                ticker.tick().await;
                let market = self.market.lock().await;
                for (auction_id, winner) in
                    newly_finished(market.auctions().all(), Utc::now(), &mut finished)
                {
                    match winner {
                        Some(winner) => info!(
                            "{:<12} --> 경매 종료: id={} 낙찰자={}",
                            "Scheduler", auction_id, winner
                        ),
                        None => info!(
                            "{:<12} --> 경매 종료: id={} 입찰 없음",
                            "Scheduler", auction_id
                        ),
                    }
                }
            }
        })
    }
}

/// 이번에 처음으로 종료가 확인된 경매와 낙찰자.
/// `seen`에 이미 있는 경매는 다시 보고하지 않는다.
pub fn newly_finished(
    auctions: &[Auction],
    now: DateTime<Utc>,
    seen: &mut HashSet<AuctionId>,
) -> Vec<(AuctionId, Option<String>)> {
    let mut finished = Vec::new();
    for auction in auctions {
        if seen.contains(&auction.id) {
            continue;
        }
        match auction_status(auction, now) {
            Ok(status) if status.countdown.is_finished => {
                seen.insert(auction.id);
                finished.push((auction.id, status.winner));
            }
            Ok(_) => {}
            Err(e) => debug!(
                "{:<12} --> 종료 시각 해석 실패: id={} {}",
                "Scheduler", auction.id, e
            ),
        }
    }
    finished
}
// endregion: --- Auction Scheduler

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[tokio::test]
    async fn past_end_is_finished_before_first_tick() {
        let end = Utc::now() - chrono::Duration::hours(1);
        let mut ticker = CountdownTicker::start(end, Duration::from_secs(1));

        assert_eq!(ticker.current(), Countdown::finished());
        assert_eq!(ticker.next_tick().await, Some(Countdown::finished()));
        assert_eq!(ticker.next_tick().await, None);
    }

    #[tokio::test]
    async fn short_countdown_finishes_and_stops() {
        let end = Utc::now() + chrono::Duration::milliseconds(300);
        let mut ticker = CountdownTicker::start(end, Duration::from_millis(50));

        let first = ticker.next_tick().await.unwrap();
        assert!(!first.is_finished);

        let last = tokio::time::timeout(Duration::from_secs(5), async {
            let mut last = first;
            while let Some(countdown) = ticker.next_tick().await {
                assert!(countdown.total_seconds() <= last.total_seconds());
                last = countdown;
            }
            last
        })
        .await
        .unwrap();

        assert_eq!(last, Countdown::finished());
        assert_eq!(ticker.current(), Countdown::finished());
    }

    #[test]
    fn newly_finished_reports_each_auction_once() {
        let now = Utc::now();
        let mut ended = seed::initial_auctions().remove(0);
        ended.end_date = (now - chrono::Duration::minutes(1)).to_rfc3339();
        let mut running = ended.clone();
        running.id = 2;
        running.end_date = (now + chrono::Duration::minutes(1)).to_rfc3339();
        let mut broken = ended.clone();
        broken.id = 3;
        broken.end_date = "sem data".to_string();

        let auctions = vec![ended, running, broken];
        let mut seen = HashSet::new();

        assert_eq!(
            newly_finished(&auctions, now, &mut seen),
            vec![(1, Some("Carlos Mendes".to_string()))]
        );
        assert!(newly_finished(&auctions, now, &mut seen).is_empty());

        let later = now + chrono::Duration::minutes(2);
        assert_eq!(
            newly_finished(&auctions, later, &mut seen),
            vec![(2, Some("Carlos Mendes".to_string()))]
        );
    }
}
