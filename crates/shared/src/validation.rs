//! Common validation utilities.

use chrono::{Datelike, NaiveDate};
use validator::{ValidateEmail, ValidationError};

/// Largest threshold day a reminder may be configured for.
pub const MAX_THRESHOLD_DAYS: i32 = 365;

/// Maximum number of threshold days in one settings record.
pub const MAX_THRESHOLD_COUNT: usize = 10;

/// Earliest and latest accepted maintenance years.
const MIN_MAINTENANCE_YEAR: i32 = 2000;
const MAX_MAINTENANCE_YEAR: i32 = 2100;

/// Validates a vehicle number (display key).
///
/// Must contain at least one non-whitespace character and only letters,
/// digits, spaces and hyphens.
pub fn validate_vehicle_number(number: &str) -> Result<(), ValidationError> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("vehicle_number_empty");
        err.message = Some("Vehicle number must not be empty".into());
        return Err(err);
    }

    if trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == ' ')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("vehicle_number_format");
        err.message =
            Some("Vehicle number may only contain letters, digits, spaces and hyphens".into());
        Err(err)
    }
}

/// Validates that a text field has at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a maintenance date is within a plausible range.
pub fn validate_maintenance_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if (MIN_MAINTENANCE_YEAR..=MAX_MAINTENANCE_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("maintenance_date_range");
        err.message = Some("Maintenance date must be between 2000 and 2100".into());
        Err(err)
    }
}

/// Validates a reminder recipient email address.
///
/// An empty value is accepted: the email channel is skipped until an
/// address is configured.
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || trimmed.validate_email() {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Recipient email is not a valid address".into());
        Err(err)
    }
}

/// Validates a reminder recipient phone number.
///
/// Accepts an optional leading `+` followed by 7 to 15 digits. An empty
/// value is accepted: the SMS channel is skipped until a number is configured.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 7 to 15 digits with optional leading +".into());
        Err(err)
    }
}

/// Validates the threshold days of a notification settings record.
pub fn validate_threshold_days(days: &[i32]) -> Result<(), ValidationError> {
    if days.len() > MAX_THRESHOLD_COUNT {
        let mut err = ValidationError::new("threshold_count");
        err.message = Some(format!("At most {} threshold days are allowed", MAX_THRESHOLD_COUNT).into());
        return Err(err);
    }

    if days.iter().all(|d| (0..=MAX_THRESHOLD_DAYS).contains(d)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("threshold_range");
        err.message = Some(
            format!("Threshold days must be between 0 and {}", MAX_THRESHOLD_DAYS).into(),
        );
        Err(err)
    }
}
