//! Form Validation
//!
//! Synchronous checks run by the settings and menu forms before any request
//! is sent. Messages are shown inline next to the offending field.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Validation failures with user-facing messages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Phone number must start with +")]
    PhoneMissingPlus,

    #[error("Phone number must contain at least 10 digits")]
    PhoneTooShort,

    #[error("{field} must be in 24-hour HH:MM format")]
    InvalidTime { field: &'static str },

    #[error("Opening time must be before closing time")]
    HoursOutOfOrder,

    #[error("Price must be a positive number")]
    InvalidPrice,

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Party size must be between 1 and {max}")]
    PartySize { max: u32 },

    #[error("Tax rate must be between 0 and 100")]
    TaxRate,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PARTY_SIZE: u32 = 50;

fn time_regex() -> &'static Regex {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    TIME_RE.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time regex"))
}

/// Phone numbers must be in international form: leading `+`, 10+ digits.
pub fn validate_phone_number(input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('+') {
        return Err(ValidationError::PhoneMissingPlus);
    }
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::PhoneTooShort);
    }
    Ok(trimmed.to_string())
}

/// 24-hour `HH:MM`
pub fn validate_time(field: &'static str, input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if time_regex().is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidTime { field })
    }
}

/// Validate an opening/closing pair. Blank values are allowed and come back
/// as `None`; when both are present opening must sort before closing.
pub fn validate_operating_hours(
    opening: &str,
    closing: &str,
) -> ValidationResult<(Option<String>, Option<String>)> {
    let opening = non_blank(opening)
        .map(|t| validate_time("Opening time", t))
        .transpose()?;
    let closing = non_blank(closing)
        .map(|t| validate_time("Closing time", t))
        .transpose()?;

    if let (Some(open), Some(close)) = (&opening, &closing) {
        if open >= close {
            return Err(ValidationError::HoursOutOfOrder);
        }
    }
    Ok((opening, closing))
}

/// Parse a price typed by a human into integer cents.
///
/// Everything except digits and `.` is stripped first, so `"$12.3abc"`
/// becomes `12.3` and then `1230`.
pub fn parse_price_cents(input: &str) -> ValidationResult<i64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = cleaned.parse().map_err(|_| ValidationError::InvalidPrice)?;
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents <= 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(cents as i64)
}

pub fn validate_required(field: &'static str, input: &str) -> ValidationResult<String> {
    non_blank(input)
        .map(str::to_string)
        .ok_or(ValidationError::Required { field })
}

/// Menu item editor: name required, price positive
pub fn validate_menu_item(name: &str, price: &str) -> ValidationResult<(String, i64)> {
    let name = validate_required("Name", name)?;
    let price = parse_price_cents(price)?;
    Ok((name, price))
}

pub fn validate_party_size(input: &str) -> ValidationResult<u32> {
    match input.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_PARTY_SIZE).contains(&n) => Ok(n),
        _ => Err(ValidationError::PartySize {
            max: MAX_PARTY_SIZE,
        }),
    }
}

/// Percent, 0–100 inclusive. A blank field means "not set".
pub fn validate_tax_rate(input: &str) -> ValidationResult<Option<f64>> {
    let Some(text) = non_blank(input) else {
        return Ok(None);
    };
    let rate: f64 = text
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| ValidationError::TaxRate)?;
    if !(0.0..=100.0).contains(&rate) {
        return Err(ValidationError::TaxRate);
    }
    Ok(Some(rate))
}

fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_requires_plus() {
        assert_eq!(
            validate_phone_number("5551234567"),
            Err(ValidationError::PhoneMissingPlus)
        );
        assert_eq!(
            validate_phone_number("+15551234567"),
            Ok("+15551234567".to_string())
        );
    }

    #[test]
    fn test_phone_digit_count_ignores_formatting() {
        assert_eq!(
            validate_phone_number("+1 (555) 123"),
            Err(ValidationError::PhoneTooShort)
        );
        assert!(validate_phone_number(" +44 20 7946 0958 ").is_ok());
    }

    #[test]
    fn test_time_format() {
        assert!(validate_time("Opening time", "09:00").is_ok());
        assert!(validate_time("Opening time", "23:59").is_ok());
        assert!(validate_time("Opening time", "24:00").is_err());
        assert!(validate_time("Opening time", "9:00").is_err());
        assert!(validate_time("Opening time", "09:60").is_err());
    }

    #[test]
    fn test_operating_hours_order() {
        assert_eq!(
            validate_operating_hours("10:00", "09:00"),
            Err(ValidationError::HoursOutOfOrder)
        );
        assert_eq!(
            validate_operating_hours("09:00", "22:00"),
            Ok((Some("09:00".to_string()), Some("22:00".to_string())))
        );
        assert_eq!(
            validate_operating_hours("12:00", "12:00"),
            Err(ValidationError::HoursOutOfOrder)
        );
    }

    #[test]
    fn test_operating_hours_partial() {
        assert_eq!(
            validate_operating_hours("", "22:00"),
            Ok((None, Some("22:00".to_string())))
        );
        assert_eq!(
            validate_operating_hours("7pm", ""),
            Err(ValidationError::InvalidTime {
                field: "Opening time"
            })
        );
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price_cents("$12.3abc"), Ok(1230));
        assert_eq!(parse_price_cents("0.1"), Ok(10));
        assert_eq!(parse_price_cents("19.999"), Ok(2000));
        assert_eq!(parse_price_cents("abc"), Err(ValidationError::InvalidPrice));
        assert_eq!(parse_price_cents("0"), Err(ValidationError::InvalidPrice));
        assert_eq!(parse_price_cents("1.2.3"), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_menu_item_validation() {
        assert_eq!(
            validate_menu_item("  ", "5"),
            Err(ValidationError::Required { field: "Name" })
        );
        assert_eq!(
            validate_menu_item("Soup", "$5.50"),
            Ok(("Soup".to_string(), 550))
        );
    }

    #[test]
    fn test_party_size_and_tax() {
        assert_eq!(validate_party_size("4"), Ok(4));
        assert!(validate_party_size("0").is_err());
        assert!(validate_party_size("51").is_err());
        assert_eq!(validate_tax_rate(""), Ok(None));
        assert_eq!(validate_tax_rate("8.875%"), Ok(Some(8.875)));
        assert_eq!(validate_tax_rate("101"), Err(ValidationError::TaxRate));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidTime {
                field: "Closing time"
            }
            .to_string(),
            "Closing time must be in 24-hour HH:MM format"
        );
    }
}
