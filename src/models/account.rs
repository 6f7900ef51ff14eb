//! Account, settings and user DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weekdays the restaurant is open, Sunday = 0 … Saturday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperatingDays(u8);

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl OperatingDays {
    pub const NONE: OperatingDays = OperatingDays(0);
    pub const EVERY_DAY: OperatingDays = OperatingDays(0b111_1111);

    pub fn from_bits(bits: u8) -> Self {
        OperatingDays(bits & 0b111_1111)
    }

    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Self {
        days.into_iter()
            .filter(|d| *d < 7)
            .fold(OperatingDays::NONE, |acc, d| OperatingDays(acc.0 | (1 << d)))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, day: u8) -> bool {
        day < 7 && self.0 & (1 << day) != 0
    }

    pub fn toggle(&mut self, day: u8) {
        if day < 7 {
            self.0 ^= 1 << day;
        }
    }

    pub fn days(&self) -> Vec<u8> {
        (0..7).filter(|d| self.contains(*d)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// "Mon, Tue, Fri" or "Every day"
    pub fn describe(&self) -> String {
        if *self == OperatingDays::EVERY_DAY {
            return "Every day".to_string();
        }
        if self.is_empty() {
            return "Closed".to_string();
        }
        self.days()
            .into_iter()
            .map(|d| WEEKDAY_LABELS[d as usize])
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDays {
    List(Vec<u8>),
    Mask(u8),
    Null(()),
}

impl<'de> Deserialize<'de> for OperatingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireDays::deserialize(deserializer)? {
            WireDays::List(days) => OperatingDays::from_days(days),
            WireDays::Mask(bits) => OperatingDays::from_bits(bits),
            WireDays::Null(()) => OperatingDays::NONE,
        })
    }
}

impl Serialize for OperatingDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days().serialize(serializer)
    }
}

/// Restaurant account with its business profile and phone/AI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub business_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub twilio_phone_number: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub opening_time: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub operating_days: OperatingDays,
    /// Percent, e.g. 8.875
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub trial_ends_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Whole days left in the trial, if the account is on one
    pub fn trial_days_left(&self, now: DateTime<Utc>) -> Option<i64> {
        self.trial_ends_at
            .map(|end| (end - now).num_days().max(0))
    }

    pub fn hours_label(&self) -> String {
        match (&self.opening_time, &self.closing_time) {
            (Some(open), Some(close)) => format!("{}–{}", open, close),
            _ => "Hours not set".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneNumberUpdate {
    pub twilio_phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingHoursUpdate {
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub operating_days: OperatingDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Admin,
    #[default]
    #[serde(other)]
    Staff,
}

/// Signed-in user, cached alongside the auth token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operating_days_from_list_and_mask() {
        let from_list: OperatingDays = serde_json::from_str("[1, 2, 3, 9]").unwrap();
        assert_eq!(from_list.days(), vec![1, 2, 3]);
        let from_mask: OperatingDays = serde_json::from_str("127").unwrap();
        assert_eq!(from_mask, OperatingDays::EVERY_DAY);
        assert_eq!(serde_json::to_string(&from_list).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_operating_days_toggle_and_describe() {
        let mut days = OperatingDays::from_days([1, 5]);
        assert_eq!(days.describe(), "Mon, Fri");
        days.toggle(5);
        assert!(!days.contains(5));
        days.toggle(9);
        assert_eq!(days.days(), vec![1]);
        assert_eq!(OperatingDays::NONE.describe(), "Closed");
    }

    #[test]
    fn test_account_trial_days() {
        let account: Account = serde_json::from_str(
            r#"{"id": "a1", "business_name": "Luigi's", "trial_ends_at": "2024-01-11T00:00:00Z",
                "opening_time": "09:00", "closing_time": "22:00", "operating_days": [0,6]}"#,
        )
        .unwrap();
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(account.trial_days_left(now), Some(10));
        assert_eq!(account.hours_label(), "09:00–22:00");
        assert_eq!(account.operating_days.describe(), "Sun, Sat");
    }

    #[test]
    fn test_null_operating_days_is_closed() {
        let account: Account = serde_json::from_str(
            r#"{"id": "a2", "business_name": "Noodle Bar", "operating_days": null}"#,
        )
        .unwrap();
        assert_eq!(account.operating_days, OperatingDays::NONE);
        assert_eq!(account.operating_days.describe(), "Closed");
    }

    #[test]
    fn test_unknown_role_is_staff() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id": "u1", "email": "a@b.c", "role": "manager"}"#).unwrap();
        assert_eq!(user.role, UserRole::Staff);
        assert_eq!(user.display_name(), "a@b.c");

        let admin: UserProfile =
            serde_json::from_str(r#"{"id": "u2", "email": "x@y.z", "role": "admin"}"#).unwrap();
        assert_eq!(admin.role, UserRole::Admin);
    }
}
