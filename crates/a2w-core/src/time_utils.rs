use chrono::{DateTime, Local, TimeDelta, Utc};

/// Second-precision local timestamp layout used by `time_format`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DURATION_UNITS: [(&str, u64); 4] = [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)];

/// Formats `timestamp` in the process-local time zone as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp_local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Renders an elapsed duration such as `1d 2h 3m 4s`.
///
/// Zero-valued units are skipped, sub-second precision is truncated, a zero
/// duration renders as `0s` and negative durations carry a leading `-`.
pub fn format_duration(delta: TimeDelta) -> String {
    let total_seconds = delta.num_seconds();
    let mut remaining = total_seconds.unsigned_abs();
    if remaining == 0 {
        return "0s".to_string();
    }

    let mut parts = Vec::with_capacity(DURATION_UNITS.len());
    for (suffix, unit_seconds) in DURATION_UNITS {
        let value = remaining / unit_seconds;
        remaining %= unit_seconds;
        if value > 0 {
            parts.push(format!("{value}{suffix}"));
        }
    }

    let sign = if total_seconds < 0 { "-" } else { "" };
    format!("{sign}{}", parts.join(" "))
}

/// Returns the human-readable time elapsed from `start` to `end`.
pub fn duration_between(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format_duration(end.signed_duration_since(start))
}

/// Returns the human-readable time elapsed from `start` to the current clock.
pub fn duration_from_now(start: DateTime<Utc>) -> String {
    duration_between(start, Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::{duration_between, duration_from_now, format_duration, format_timestamp_local};

    #[test]
    fn unit_format_duration_skips_zero_units() {
        assert_eq!(format_duration(TimeDelta::seconds(0)), "0s");
        assert_eq!(format_duration(TimeDelta::seconds(59)), "59s");
        assert_eq!(format_duration(TimeDelta::seconds(3_600)), "1h");
        assert_eq!(format_duration(TimeDelta::seconds(3_605)), "1h 5s");
        assert_eq!(
            format_duration(TimeDelta::seconds(86_400 + 2 * 3_600 + 3 * 60 + 4)),
            "1d 2h 3m 4s"
        );
    }

    #[test]
    fn unit_format_duration_truncates_sub_second_precision() {
        assert_eq!(format_duration(TimeDelta::milliseconds(999)), "0s");
        assert_eq!(format_duration(TimeDelta::milliseconds(61_900)), "1m 1s");
    }

    #[test]
    fn regression_format_duration_marks_negative_spans() {
        assert_eq!(format_duration(TimeDelta::seconds(-90)), "-1m 30s");
    }

    #[test]
    fn functional_duration_between_handles_multi_day_spans() {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("start");
        let end = Utc
            .with_ymd_and_hms(2024, 1, 3, 6, 30, 0)
            .single()
            .expect("end");
        assert_eq!(duration_between(start, end), "2d 6h 30m");
    }

    #[test]
    fn functional_duration_from_now_measures_against_current_clock() {
        let start = Utc::now() - TimeDelta::hours(2);
        let rendered = duration_from_now(start);
        assert!(rendered.starts_with("2h"), "unexpected duration: {rendered}");
    }

    #[test]
    fn unit_format_timestamp_local_uses_second_precision_layout() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 9, 17, 4, 5)
            .single()
            .expect("timestamp");
        let rendered = format_timestamp_local(timestamp);
        assert_eq!(rendered.len(), "2024-03-09 17:04:05".len());
        assert_eq!(
            rendered,
            timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        );
    }
}
