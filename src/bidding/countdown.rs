//! 남은 시간 계산
//!
//! `(now, end)`만으로 결정되는 순수 함수. 종료 여부는 저장되지 않고
//! 매번 다시 계산된다.

use crate::bidding::model::BidRecord;
use crate::error::MarketError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub is_finished: bool,
}

impl Countdown {
    pub fn finished() -> Self {
        Self {
            is_finished: true,
            ..Self::default()
        }
    }

    pub fn between(now: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let distance = (end - now).num_milliseconds();
        if distance < 0 {
            return Self::finished();
        }

        Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
            is_finished: false,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds
    }
}

/// 경매 종료 시각 해석
///
/// 오프셋이 있는 RFC 3339는 그대로, 오프셋 없는 `YYYY-MM-DDTHH:MM[:SS]`는
/// 현지 시각으로 본다.
pub fn parse_end_date(text: &str) -> Result<DateTime<Utc>, MarketError> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| MarketError::InvalidEndDate(text.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| MarketError::InvalidEndDate(text.to_string()))
}

/// 종료된 경매의 낙찰자 (입찰 이력 맨 앞의 표시 이름)
pub fn winner<'a>(countdown: &Countdown, bid_history: &'a [BidRecord]) -> Option<&'a str> {
    if !countdown.is_finished {
        return None;
    }
    bid_history.first().map(|bid| bid.user.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn splits_remaining_time() {
        let now = at("2025-01-01T00:00:00Z");
        let end = now
            + Duration::days(2)
            + Duration::hours(3)
            + Duration::minutes(4)
            + Duration::seconds(5)
            + Duration::milliseconds(999);

        assert_eq!(
            Countdown::between(now, end),
            Countdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
                is_finished: false,
            }
        );
    }

    #[test]
    fn past_end_is_finished_with_zeros() {
        let now = at("2025-01-01T00:00:00Z");
        let end = now - Duration::milliseconds(1);

        assert_eq!(Countdown::between(now, end), Countdown::finished());
        assert_eq!(Countdown::finished().total_seconds(), 0);
    }

    #[test]
    fn exact_end_instant_is_not_yet_finished() {
        let now = at("2025-01-01T00:00:00Z");
        let countdown = Countdown::between(now, now);

        assert!(!countdown.is_finished);
        assert_eq!(countdown.total_seconds(), 0);
    }

    #[test]
    fn remaining_seconds_never_increase() {
        let end = at("2025-01-01T00:00:10Z");
        let mut now = at("2024-12-31T23:59:50Z");
        let mut last = Countdown::between(now, end);
        let mut finished_at = None;

        for step in 0..50 {
            now = now + Duration::milliseconds(500);
            let next = Countdown::between(now, end);
            assert!(next.total_seconds() <= last.total_seconds());
            if last.is_finished {
                assert_eq!(next, last);
            }
            if next.is_finished && finished_at.is_none() {
                finished_at = Some(step);
            }
            last = next;
        }
        assert!(finished_at.is_some());
    }

    #[test]
    fn parses_offset_and_naive_end_dates() {
        assert_eq!(
            parse_end_date("2025-09-20T23:59:00Z").unwrap(),
            at("2025-09-20T23:59:00Z")
        );
        assert_eq!(
            parse_end_date("2025-09-20T23:59:00-03:00").unwrap(),
            at("2025-09-21T02:59:00Z")
        );
        assert!(parse_end_date("2025-09-20T23:59:00").is_ok());
        assert!(parse_end_date("2025-09-20T23:59").is_ok());
        assert!(matches!(
            parse_end_date("amanhã"),
            Err(MarketError::InvalidEndDate(_))
        ));
    }

    #[test]
    fn winner_only_after_finish() {
        let history = vec![
            BidRecord {
                user: "Carlos".to_string(),
                amount: 1200.0,
                date: "20/07/2024 14:28".to_string(),
            },
            BidRecord {
                user: "Sofia".to_string(),
                amount: 1150.0,
                date: "20/07/2024 14:25".to_string(),
            },
        ];

        let running = Countdown {
            seconds: 3,
            ..Countdown::default()
        };
        assert_eq!(winner(&running, &history), None);
        assert_eq!(winner(&Countdown::finished(), &history), Some("Carlos"));
        assert_eq!(winner(&Countdown::finished(), &[]), None);
    }
}
