//! Input parsing for the shell.
//!
//! Pure functions; the shell decides which message to show on failure.

use crate::error::BookingError;
use chrono::{NaiveDate, NaiveTime};

pub use sipk_runtime::console::parse_choice;

/// Date format accepted at the prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format accepted at the prompt
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a `YYYY-MM-DD` calendar date
///
/// # Errors
///
/// [`BookingError::InvalidDate`] for malformed or impossible dates
/// such as `2025-02-30`, and for signed years like `+2025-01-01`.
pub fn parse_date(input: &str) -> Result<NaiveDate, BookingError> {
    let input = input.trim();
    if input.starts_with(['+', '-']) {
        return Err(BookingError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| BookingError::InvalidDate(input.to_string()))
}

/// Parses an `HH:MM` 24-hour time
///
/// # Errors
///
/// [`BookingError::InvalidTime`] when the hour or minute is out of range
/// or the text is not `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime, BookingError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|_| BookingError::InvalidTime(input.to_string()))
}

/// Returns true if `input` is a valid `YYYY-MM-DD` date
#[must_use]
pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_ok()
}

/// Returns true if `input` is a valid `HH:MM` time
#[must_use]
pub fn is_valid_time(input: &str) -> bool {
    parse_time(input).is_ok()
}

/// Returns true if both times parse and `end` is strictly after `start`
#[must_use]
pub fn is_time_ordered(start: &str, end: &str) -> bool {
    matches!((parse_time(start), parse_time(end)), (Ok(s), Ok(e)) if e > s)
}

/// Returns true if the trimmed password has at least `min` characters
#[must_use]
pub fn is_valid_password(password: &str, min: usize) -> bool {
    password.trim().chars().count() >= min
}

/// Returns true if `input` has something other than whitespace
#[must_use]
pub fn is_non_empty(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Answer to "pick a booking number, or cancel"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The user backed out
    Cancel,
    /// 0-based position in the list
    Index(usize),
}

/// Parses a 1-based list number or `b` (any case) for cancel
///
/// Returns `None` when the input is neither, so the caller can re-prompt.
#[must_use]
pub fn parse_selection(input: &str, len: usize) -> Option<Selection> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("b") {
        return Some(Selection::Cancel);
    }

    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| Selection::Index(n - 1))
}

/// Interprets a yes/no answer; only `y` (any case) means yes
#[must_use]
pub fn is_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}
