//! Time handling for daily granule searches.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// The full UTC day covered by `date`: 00:00:00Z through 23:59:59Z.
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let end = start + Duration::seconds(86_399);
    (start, end)
}

/// Format an instant the way the catalog's `temporal` parameter expects it.
pub fn format_cmr_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_window_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (start, end) = day_window(date);
        assert_eq!(format_cmr_instant(&start), "2024-06-01T00:00:00Z");
        assert_eq!(format_cmr_instant(&end), "2024-06-01T23:59:59Z");
    }

    #[test]
    fn test_day_window_leap_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (start, end) = day_window(date);
        assert!(start < end);
        assert_eq!((end - start).num_seconds(), 86_399);
    }
}
