use chrono::{DateTime, Utc};

/// Split a second count into (hours, minutes, seconds).
pub fn split_clock(total_seconds: u64) -> (u64, u64, u64) {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (hours, minutes, seconds)
}

/// Inverse of `split_clock`.
pub fn compose_clock(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours * 3600 + minutes * 60 + seconds
}

/// "H:MM:SS" when there is an hour component, "M:SS" otherwise.
pub fn format_clock(total_seconds: u64) -> String {
    let (hours, minutes, seconds) = split_clock(total_seconds);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Parse "H:M:S" or "M:S" into seconds. Anything else parses as 0.
pub fn parse_clock(input: &str) -> u64 {
    let parts: Vec<u64> = input
        .split(':')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect();

    match parts.as_slice() {
        [hours, minutes, seconds] => compose_clock(*hours, *minutes, *seconds),
        [minutes, seconds] => compose_clock(0, *minutes, *seconds),
        _ => 0,
    }
}

/// Completion percentage, rounded. 0 when the total is absent or zero.
pub fn completion_percent(position_seconds: u64, total_seconds: Option<u64>) -> u8 {
    match total_seconds {
        Some(total) if total > 0 => {
            ((position_seconds as f64 / total as f64) * 100.0).round() as u8
        }
        _ => 0,
    }
}

/// Human label for how long ago a timestamp was: "Just now" under a
/// minute, then minutes/hours/days, absolute date past 30 days.
pub fn relative_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();

    if days > 30 {
        timestamp.date_naive().to_string()
    } else if days > 0 {
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_split_compose_round_trip() {
        for total in [0, 1, 59, 60, 61, 3599, 3600, 3661, 7325, 359_999, 1_000_003] {
            let (h, m, s) = split_clock(total);
            assert!(m < 60 && s < 60);
            assert_eq!(compose_clock(h, m, s), total);
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(3661), "1:01:01");
        assert_eq!(format_clock(8160), "2:16:00");
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("1:01:01"), 3661);
        assert_eq!(parse_clock("59:59"), 3599);
        assert_eq!(parse_clock("0:00"), 0);
        assert_eq!(parse_clock("garbage"), 0);
        assert_eq!(parse_clock(""), 0);
        assert_eq!(parse_clock("1:2:3:4"), 0);
    }

    #[test]
    fn test_parse_format_round_trip() {
        for total in [0, 59, 61, 3599, 3600, 3661, 8160] {
            assert_eq!(parse_clock(&format_clock(total)), total);
        }
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(0, Some(100)), 0);
        assert_eq!(completion_percent(50, Some(100)), 50);
        assert_eq!(completion_percent(100, Some(100)), 100);
        // Rounded, not truncated
        assert_eq!(completion_percent(1, Some(3)), 33);
        assert_eq!(completion_percent(2, Some(3)), 67);
        // Absent or zero total
        assert_eq!(completion_percent(1200, None), 0);
        assert_eq!(completion_percent(1200, Some(0)), 0);
    }

    #[test]
    fn test_relative_label_just_now() {
        let now = Utc::now();
        assert_eq!(relative_label(now - Duration::seconds(10), now), "Just now");
        assert_eq!(relative_label(now - Duration::seconds(59), now), "Just now");
    }

    #[test]
    fn test_relative_label_units() {
        let now = Utc::now();
        assert_eq!(relative_label(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_label(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(relative_label(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_label(now - Duration::hours(25), now), "1 day ago");
        assert_eq!(relative_label(now - Duration::days(12), now), "12 days ago");
    }

    #[test]
    fn test_relative_label_old_dates_are_absolute() {
        let now = Utc::now();
        let old = now - Duration::days(45);
        assert_eq!(relative_label(old, now), old.date_naive().to_string());
    }
}
