use chrono::{TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

/// Picks a label format for the visible time span (in milliseconds).
pub fn determine_date_format(visible_span_ms: i64) -> SmartDateFormat {
    const MINUTE: i64 = 60_000;
    const DAY: i64 = 24 * 60 * MINUTE;

    if visible_span_ms > DAY * 3 / 2 {
        SmartDateFormat::DayMonth
    } else if visible_span_ms > MINUTE * 5 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Format for keys running from `first_ms` to `last_ms`, in either order.
pub fn format_for_range(first_ms: i64, last_ms: i64) -> SmartDateFormat {
    determine_date_format(last_ms.saturating_sub(first_ms).saturating_abs())
}

/// Formats a unix timestamp in milliseconds (UTC).
pub fn format_timestamp(ms: i64, format: SmartDateFormat) -> String {
    let dt = match Utc.timestamp_millis_opt(ms) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return ms.to_string(),
    };

    match format {
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_spans_show_seconds() {
        assert_eq!(determine_date_format(30_000), SmartDateFormat::HourMinSec);
        assert_eq!(determine_date_format(3_600_000), SmartDateFormat::HourMin);
        assert_eq!(determine_date_format(7 * 86_400_000), SmartDateFormat::DayMonth);
    }

    #[test]
    fn range_order_does_not_matter() {
        let two_days = 2 * 86_400_000;
        assert_eq!(format_for_range(0, two_days), SmartDateFormat::DayMonth);
        assert_eq!(format_for_range(two_days, 0), SmartDateFormat::DayMonth);
        assert_eq!(format_for_range(5_000, 5_000), SmartDateFormat::HourMinSec);
    }

    #[test]
    fn formats_utc_time() {
        // 1970-01-01 01:02:03.500
        let ms = (3600 + 2 * 60 + 3) * 1000 + 500;
        assert_eq!(format_timestamp(ms, SmartDateFormat::HourMinSec), "01:02:03");
        assert_eq!(format_timestamp(ms, SmartDateFormat::HourMin), "01:02");
        assert_eq!(format_timestamp(ms, SmartDateFormat::DayMonth), "01 Jan");
    }
}
