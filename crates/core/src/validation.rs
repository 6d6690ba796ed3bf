//! Small input checks shared by handlers.

use crate::error::CoreError;

/// Reject a blank required string field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a latitude/longitude pair.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CoreError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::Validation(format!(
            "Latitude {lat} is out of range [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::Validation(format!(
            "Longitude {lng} is out of range [-180, 180]"
        )));
    }
    Ok(())
}

/// Normalise an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "Jane").is_ok());
    }

    #[test]
    fn coordinates_must_be_in_range() {
        assert!(validate_coordinates(40.7, -74.0).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn emails_are_lowercased_and_trimmed() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
