// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, Duration, NaiveTime, SecondsFormat, Utc, Weekday};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The next `weekday` strictly after `now`'s date, at `hour:minute` UTC.
///
/// If today is already `weekday`, this is a week from today.
pub fn next_weekday_at(now: DateTime<Utc>, weekday: Weekday, hour: u32, minute: u32) -> DateTime<Utc> {
    let today = now.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut days_ahead = (target - today).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }

    let date = now.date_naive() + Duration::days(days_ahead);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

/// Shorten a secret for logging: first 10 characters plus `...`.
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }
    let prefix: String = secret.chars().take(10).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_z_suffix() {
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(t), "2026-03-01T12:30:00Z");
    }

    #[test]
    fn test_next_sunday_from_wednesday() {
        // 2026-03-04 is a Wednesday
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap();
        let sunday = next_weekday_at(now, Weekday::Sun, 12, 0);
        assert_eq!(sunday, Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_next_weekday_on_same_day_is_a_week_later() {
        // 2026-03-07 is a Saturday
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 8, 0, 0).unwrap();
        let saturday = next_weekday_at(now, Weekday::Sat, 18, 0);
        assert_eq!(saturday, Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("EAAB1234567890abcdef"), "EAAB123456...");
        assert_eq!(redact("short"), "short...");
        assert_eq!(redact(""), "<empty>");
    }
}
