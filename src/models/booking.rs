//! Reservation DTOs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Seated,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Seated => "seated",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Seated => "Seated",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::NoShow => "No-show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_ascii_lowercase())
    }

    pub fn next_actions(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[
                BookingStatus::Seated,
                BookingStatus::NoShow,
                BookingStatus::Cancelled,
            ],
            BookingStatus::Seated => &[BookingStatus::Completed],
            _ => &[],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub status: BookingStatus,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub party_size: u32,
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl Booking {
    /// Sort key placing earlier slots first
    pub fn slot(&self) -> (&str, &str) {
        (&self.date, &self.time)
    }
}

/// Covers (total guests) across bookings that are still expected to show
pub fn expected_covers(bookings: &[Booking]) -> u32 {
    bookings
        .iter()
        .filter(|b| {
            matches!(
                b.status,
                BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::Seated
            )
        })
        .map(|b| b.party_size)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_roundtrip_names() {
        let booking: Booking = serde_json::from_str(
            r#"{"id": "b1", "status": "no_show", "date": "2024-05-01", "time": "19:30", "party_size": 4}"#,
        )
        .unwrap();
        assert_eq!(booking.status, BookingStatus::NoShow);
        assert_eq!(BookingStatus::parse("No_Show"), Some(BookingStatus::NoShow));
        assert_eq!(BookingStatus::parse("late"), None);
    }

    #[test]
    fn test_expected_covers() {
        let make = |status, party_size| Booking {
            id: "b".into(),
            status,
            date: "2024-05-01".into(),
            time: "18:00".into(),
            party_size,
            table_id: None,
            customer_id: None,
            customer_name: None,
            customer_phone: None,
            special_requests: None,
        };
        let bookings = vec![
            make(BookingStatus::Confirmed, 4),
            make(BookingStatus::Cancelled, 6),
            make(BookingStatus::Pending, 2),
        ];
        assert_eq!(expected_covers(&bookings), 6);
    }
}
