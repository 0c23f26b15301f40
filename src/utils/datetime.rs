/// Pure date utility functions (Discord-agnostic)
use chrono::{Days, NaiveDate};

use crate::constants::DATE_FORMAT;
use crate::utils::validation::ValidationError;

/// Parse a birth date written strictly as `DD.MM.YYYY`
///
/// Surrounding whitespace is ignored. Unpadded forms like `5.3.1995` are rejected.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    let bytes = input.as_bytes();

    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::DatePattern);
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| ValidationError::DateOutOfRange)
}

/// Format a birth date for display (`15.12.1990`)
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The day reminders are sent for: the day after `today`
pub fn target_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}
