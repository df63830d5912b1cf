use crate::core::catalog::resolve;
use crate::models::{Catalog, EstimationSettings, VehicleQuery};
use thiserror::Error;

/// Reasons a raw query is rejected
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You need to specify a car")]
    EmptyInput,

    #[error("The provided value for car is invalid. Please make sure to include the year, make, and model")]
    MalformedQuery,

    #[error("We don't know the make and model of \"{0}\"")]
    UnknownMakeModel(String),

    #[error("Please enter a valid year")]
    InvalidYear,

    #[error("The year needs to be between {min} and {max} (inclusively)")]
    YearOutOfRange { min: i32, max: i32 },

    #[error("Invalid value for mileage")]
    InvalidMileage,
}

/// Parse and validate a raw "year make model" description plus mileage
///
/// Validation stops at the first error. Mileage is only looked at once the
/// car description is valid.
pub fn validate(
    raw_text: &str,
    raw_mileage: &str,
    catalog: &Catalog,
    settings: &EstimationSettings,
) -> Result<VehicleQuery, ValidationError> {
    let text = normalize_text(raw_text);

    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let (year_token, remainder) = text
        .split_once(' ')
        .ok_or(ValidationError::MalformedQuery)?;

    let (make, model) = resolve(remainder, &catalog.makes, &catalog.models)
        .ok_or_else(|| ValidationError::UnknownMakeModel(remainder.to_string()))?;

    let year = parse_year(year_token, settings)?;
    let mileage = parse_mileage(raw_mileage)?;

    Ok(VehicleQuery {
        year,
        make,
        model,
        mileage,
    })
}

/// Trim, lower-case and collapse whitespace runs to a single space
fn normalize_text(raw: &str) -> String {
    raw.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_year(token: &str, settings: &EstimationSettings) -> Result<i32, ValidationError> {
    if !is_all_digits(token) {
        return Err(ValidationError::InvalidYear);
    }

    let out_of_range = ValidationError::YearOutOfRange {
        min: settings.min_year,
        max: settings.max_year,
    };

    // Too many digits for an i32 is still a whole number, just out of range
    let year: i32 = token.parse().map_err(|_| out_of_range.clone())?;

    if year < settings.min_year || year > settings.max_year {
        return Err(out_of_range);
    }

    Ok(year)
}

/// Parse a mileage, tolerating thousands separators
///
/// Both `,` and `.` are stripped, so "12,345" and "12.345" are 12345.
pub fn parse_mileage(raw: &str) -> Result<Option<i64>, ValidationError> {
    let mileage: String = raw.trim().chars().filter(|c| *c != ',' && *c != '.').collect();

    if mileage.is_empty() {
        return Ok(None);
    }

    if !is_all_digits(&mileage) {
        return Err(ValidationError::InvalidMileage);
    }

    mileage
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidMileage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            ["toyota", "honda", "land rover"].iter().map(|s| s.to_string()).collect(),
            ["corolla", "civic", "discovery"].iter().map(|s| s.to_string()).collect(),
        )
    }

    fn check(text: &str, mileage: &str) -> Result<VehicleQuery, ValidationError> {
        validate(text, mileage, &catalog(), &EstimationSettings::default())
    }

    #[test]
    fn test_valid_query() {
        let query = check("  2015 Toyota Corolla ", "").unwrap();
        assert_eq!(query.year, 2015);
        assert_eq!(query.make, "toyota");
        assert_eq!(query.model, "corolla");
        assert_eq!(query.mileage, None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(check("   ", ""), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_single_token_is_malformed() {
        assert_eq!(check("2015", ""), Err(ValidationError::MalformedQuery));
    }

    #[test]
    fn test_unknown_make_model() {
        assert_eq!(
            check("2015 unknownmake unknownmodel", ""),
            Err(ValidationError::UnknownMakeModel("unknownmake unknownmodel".to_string()))
        );
    }

    #[test]
    fn test_make_model_checked_before_year() {
        assert!(matches!(
            check("abcd unknownmake unknownmodel", ""),
            Err(ValidationError::UnknownMakeModel(_))
        ));
    }

    #[test]
    fn test_invalid_year() {
        assert_eq!(check("20x5 toyota corolla", ""), Err(ValidationError::InvalidYear));
        assert_eq!(check("-2015 toyota corolla", ""), Err(ValidationError::InvalidYear));
    }

    #[test]
    fn test_year_out_of_range() {
        let expected = Err(ValidationError::YearOutOfRange { min: 1980, max: 2025 });
        assert_eq!(check("1979 toyota corolla", ""), expected);
        assert_eq!(check("2026 toyota corolla", ""), expected);
        assert_eq!(check("99999999999 toyota corolla", ""), expected);
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        assert!(check("1980 toyota corolla", "").is_ok());
        assert!(check("2025 toyota corolla", "").is_ok());
    }

    #[test]
    fn test_mileage_separators() {
        assert_eq!(parse_mileage("12,345"), Ok(Some(12345)));
        assert_eq!(parse_mileage("12.345"), Ok(Some(12345)));
        assert_eq!(parse_mileage(" 0 "), Ok(Some(0)));
        assert_eq!(parse_mileage(""), Ok(None));
        assert_eq!(parse_mileage(" , "), Ok(None));
    }

    #[test]
    fn test_invalid_mileage() {
        assert_eq!(parse_mileage("12k"), Err(ValidationError::InvalidMileage));
        assert_eq!(parse_mileage("-100"), Err(ValidationError::InvalidMileage));
        assert_eq!(
            check("2015 toyota corolla", "lots"),
            Err(ValidationError::InvalidMileage)
        );
    }

    #[test]
    fn test_mileage_ignored_when_description_invalid() {
        assert_eq!(check("", "lots"), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "You need to specify a car");
        assert_eq!(
            ValidationError::YearOutOfRange { min: 1980, max: 2025 }.to_string(),
            "The year needs to be between 1980 and 2025 (inclusively)"
        );
    }
}
