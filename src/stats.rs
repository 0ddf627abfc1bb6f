use crate::models::{AppData, Entry, HabitStat, HealthStat, NumericSummary, StatsResponse};
use chrono::{Duration, Local, NaiveDate};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Shared range filter: an entry is in range iff its date parses and falls in
/// `[start, today]`, both ends inclusive. Entries with unparsable dates are
/// excluded rather than being an error.
pub fn entries_in_range<'a>(
    entries: &'a [Entry],
    start: NaiveDate,
    today: NaiveDate,
) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|entry| {
            parse_day(&entry.date)
                .map(|date| date >= start && date <= today)
                .unwrap_or(false)
        })
        .collect()
}

/// Percentage of calendar days in `[start, today]` covered by in-range
/// entries. Every entry counts, so duplicate same-day entries can push the
/// rate past 100.
pub fn completion_rate(entries: &[Entry], start: NaiveDate, today: NaiveDate) -> u32 {
    if start > today {
        warn!("start {start} is after {today}; treating range as empty");
        return 0;
    }

    let days_in_range = (today - start).num_days() + 1;
    let valid = entries_in_range(entries, start, today).len();
    ((valid as f64 / days_in_range as f64) * 100.0).round() as u32
}

/// Consecutive distinct days with at least one entry, counted backward from
/// today. If today has no entry yet the walk starts at yesterday instead;
/// that one-day grace is applied at most once.
pub fn current_streak(entries: &[Entry], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = entries
        .iter()
        .filter_map(|entry| parse_day(&entry.date))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut cursor = today;
    if !days.contains(&cursor) {
        cursor -= Duration::days(1);
    }

    let mut streak = 0;
    for day in days {
        if day == cursor {
            streak += 1;
            cursor -= Duration::days(1);
        } else {
            break;
        }
    }

    streak
}

/// Min/max/average over the numeric values of in-range entries. Values that
/// are zero, unparsable, or NaN are excluded: a zero reading means "no
/// measurement" for these logs, not a true zero. With nothing left the
/// summary is all zeros. The average is full precision; rounding is left to
/// the presentation layer.
pub fn numeric_summary(entries: &[Entry], start: NaiveDate, today: NaiveDate) -> NumericSummary {
    let values: Vec<f64> = entries_in_range(entries, start, today)
        .iter()
        .filter_map(|entry| entry.value.as_deref())
        .filter_map(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| *value != 0.0 && !value.is_nan())
        .collect();

    if values.is_empty() {
        return NumericSummary::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    NumericSummary { min, max, avg }
}

pub fn build_stats(data: &AppData, start: NaiveDate, today: NaiveDate) -> StatsResponse {
    let today_key = today.to_string();

    let habits = data
        .habits
        .groups
        .iter()
        .map(|(key, entries)| HabitStat {
            key: key.clone(),
            rate: completion_rate(entries, start, today),
            streak: current_streak(entries, today),
            done_today: entries.iter().any(|entry| entry.date == today_key),
        })
        .collect();

    let mut health: Vec<HealthStat> = data
        .health
        .groups
        .iter()
        .map(|(key, entries)| {
            let summary = numeric_summary(entries, start, today);
            HealthStat {
                key: key.clone(),
                rate: completion_rate(entries, start, today),
                min: summary.min,
                max: summary.max,
                avg: summary.avg,
            }
        })
        .collect();
    // least-covered logs first, same ordering as the health panel
    health.sort_by_key(|stat| stat.rate);

    StatsResponse {
        start: start.to_string(),
        today: today_key,
        habits,
        health,
    }
}
