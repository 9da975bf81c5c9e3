//! Draw record factory

use chrono::{DateTime, Local, TimeZone};
use rand::distr::Alphanumeric;
use rand::Rng;

use ld_core::{DrawResult, PrizeGrade};

/// Length of the opaque record id
///
/// 9 alphanumeric characters give 62^9 possible tokens; collisions are
/// negligible at the expected volume of hundreds of draws per day.
const DRAW_ID_LEN: usize = 9;

/// Whether an epoch-millisecond timestamp falls on the same calendar
/// date as `now` (local time, full year/month/day equality)
pub fn same_calendar_day(timestamp_ms: i64, now: &DateTime<Local>) -> bool {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.date_naive())
        == Some(now.date_naive())
}

/// Count of history entries recorded on the same calendar date as `now`
pub fn draws_on_day(history: &[DrawResult], now: &DateTime<Local>) -> usize {
    history
        .iter()
        .filter(|r| same_calendar_day(r.timestamp, now))
        .count()
}

/// Build the record for a completed draw
///
/// The draw number is `#YYYYMMDD-NNN` where NNN is the per-calendar-day
/// sequence (001-based), derived by counting prior same-day history
/// entries. The id is a random alphanumeric token from the injected RNG.
pub fn create_record<R: Rng>(
    grade: PrizeGrade,
    history: &[DrawResult],
    now: DateTime<Local>,
    rng: &mut R,
) -> DrawResult {
    let sequence = draws_on_day(history, &now) + 1;
    let draw_number = format!("#{}-{:03}", now.format("%Y%m%d"), sequence);
    let id: String = rng
        .sample_iter(&Alphanumeric)
        .take(DRAW_ID_LEN)
        .map(char::from)
        .collect();

    DrawResult {
        id,
        grade,
        timestamp: now.timestamp_millis(),
        is_claimed: false,
        draw_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_sequence_starts_at_001_and_is_gapless() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = at(2025, 12, 17, 10);
        let mut history = Vec::new();

        for expected in 1..=5 {
            let record = create_record(PrizeGrade::Lose, &history, now, &mut rng);
            assert_eq!(record.draw_number, format!("#20251217-{expected:03}"));
            history.insert(0, record);
        }
    }

    #[test]
    fn test_sequence_resets_across_days() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut history = Vec::new();

        let yesterday = at(2025, 12, 16, 23);
        for _ in 0..3 {
            let record = create_record(PrizeGrade::Lose, &history, yesterday, &mut rng);
            history.insert(0, record);
        }

        let today = at(2025, 12, 17, 9);
        let record = create_record(PrizeGrade::First, &history, today, &mut rng);
        assert_eq!(record.draw_number, "#20251217-001");
    }

    #[test]
    fn test_same_date_in_another_year_does_not_count() {
        // Full date equality: a record from Dec 17 of a previous year
        // must not inflate today's sequence counter.
        let mut rng = StdRng::seed_from_u64(3);
        let mut history = Vec::new();

        let last_year = at(2024, 12, 17, 12);
        history.insert(0, create_record(PrizeGrade::Lose, &history, last_year, &mut rng));

        let today = at(2025, 12, 17, 12);
        let record = create_record(PrizeGrade::Lose, &history, today, &mut rng);
        assert_eq!(record.draw_number, "#20251217-001");
    }

    #[test]
    fn test_record_shape() {
        let mut rng = StdRng::seed_from_u64(4);
        let now = at(2025, 6, 1, 14);
        let record = create_record(PrizeGrade::Second, &[], now, &mut rng);

        assert_eq!(record.id.len(), 9);
        assert!(record.id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(record.grade, PrizeGrade::Second);
        assert!(!record.is_claimed);
        assert_eq!(record.timestamp, now.timestamp_millis());
    }

    #[test]
    fn test_ids_are_unique_across_a_day() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = at(2025, 6, 1, 14);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let record = create_record(PrizeGrade::Lose, &[], now, &mut rng);
            assert!(seen.insert(record.id));
        }
    }
}
