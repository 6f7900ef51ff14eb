//! Display Formatting
//!
//! Money, phone numbers, durations and relative times as shown in tables and
//! cards.

use chrono::{DateTime, Utc};

/// `1230` → `$12.30`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rem = abs % 100;

    // Thousands separators on the dollar part
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, rem)
}

/// North American numbers render as `(555) 123-4567`; anything else is
/// returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        11 if digits.starts_with('1') => &digits[1..],
        10 => &digits[..],
        _ => return phone.to_string(),
    };
    format!("({}) {}-{}", &local[0..3], &local[3..6], &local[6..10])
}

/// `125` → `2m 05s`
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// "just now", "5m ago", "3h ago", otherwise the date
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        at.format("%b %d, %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1230), "$12.30");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(-250), "-$2.50");
        assert_eq!(format_cents(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("+15551234567"), "(555) 123-4567");
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("+442079460958"), "+442079460958");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(125), "2m 05s");
        assert_eq!(format_duration(3_720), "1h 02m");
    }

    #[test]
    fn test_format_relative() {
        let now = DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_relative(now - Duration::seconds(10), now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "Mar 08, 12:00");
    }
}
