use chrono::{DateTime, Local, TimeZone};

/// Day/hour/minute/second breakdown of a non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Split whole seconds into parts. Negative input yields all zeros.
pub fn time_parts(total_secs: i64) -> TimeParts {
    if total_secs < 0 {
        return TimeParts::default();
    }
    let mut secs = total_secs as u64;
    let days = secs / 86_400;
    secs %= 86_400;
    let hours = secs / 3_600;
    secs %= 3_600;
    TimeParts {
        days,
        hours,
        minutes: secs / 60,
        seconds: secs % 60,
    }
}

/// Format seconds as "1d 2h 3m 4s", dropping leading zero parts.
/// Negative or non-finite input formats as "-".
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "-".to_string();
    }
    let parts = time_parts(secs.round() as i64);

    let mut out = Vec::new();
    if parts.days > 0 {
        out.push(format!("{}d", parts.days));
    }
    if parts.days > 0 || parts.hours > 0 {
        out.push(format!("{}h", parts.hours));
    }
    if parts.days > 0 || parts.hours > 0 || parts.minutes > 0 {
        out.push(format!("{}m", parts.minutes));
    }
    out.push(format!("{}s", parts.seconds));
    out.join(" ")
}

/// "Mon, 9 Sep 2024 14:05"
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%a, %-d %b %Y %H:%M").to_string()
}

/// Local completion time of a task timestamp, or "" when it is unset or out of range
pub fn format_timestamp(millis: i64) -> String {
    if millis == 0 {
        return String::new();
    }
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| format_datetime(&dt))
        .unwrap_or_default()
}

/// Countdown such as "2 days 3 hour 4 min 5 sec", or `expired_text` once negative
pub fn countdown_text(secs_left: i64, expired_text: &str) -> String {
    if secs_left < 0 {
        return expired_text.to_string();
    }
    let p = time_parts(secs_left);

    let mut out = Vec::new();
    if p.days > 0 {
        out.push(format!("{} days", p.days));
    }
    if p.days > 0 || p.hours > 0 {
        out.push(format!("{} hour", p.hours));
    }
    if p.days > 0 || p.hours > 0 || p.minutes > 0 {
        out.push(format!("{} min", p.minutes));
    }
    out.push(format!("{} sec", p.seconds));
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0s");
        assert_eq!(format_time(59.4), "59s");
        assert_eq!(format_time(59.5), "1m 0s");
        assert_eq!(format_time(3_600.0), "1h 0m 0s");
        assert_eq!(format_time(93_784.0), "1d 2h 3m 4s");
        assert_eq!(format_time(86_400.0 + 5.0), "1d 0h 0m 5s");
    }

    #[test]
    fn test_format_time_invalid() {
        assert_eq!(format_time(-1.0), "-");
        assert_eq!(format_time(f64::NAN), "-");
        assert_eq!(format_time(f64::INFINITY), "-");
    }

    #[test]
    fn test_time_parts() {
        assert_eq!(
            time_parts(90_061),
            TimeParts {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(time_parts(-30), TimeParts::default());
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt), "Mon, 9 Sep 2024 14:05");

        let dt = Utc.with_ymd_and_hms(2024, 12, 25, 8, 0, 0).unwrap();
        assert_eq!(format_datetime(&dt), "Wed, 25 Dec 2024 08:00");
    }

    #[test]
    fn test_format_timestamp_unset() {
        assert_eq!(format_timestamp(0), "");
        assert_eq!(format_timestamp(i64::MAX), "");

        let dt = Local.with_ymd_and_hms(2024, 9, 9, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(dt.timestamp_millis()), "Mon, 9 Sep 2024 14:05");
    }

    #[test]
    fn test_countdown_text() {
        assert_eq!(countdown_text(5, "Past deadline"), "5 sec");
        assert_eq!(countdown_text(65, "Past deadline"), "1 min 5 sec");
        assert_eq!(countdown_text(3_600, "Past deadline"), "1 hour 0 min 0 sec");
        assert_eq!(
            countdown_text(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5, "Past deadline"),
            "2 days 3 hour 4 min 5 sec"
        );
        assert_eq!(countdown_text(-1, "Past deadline"), "Past deadline");
    }
}
