//! Date-range form: field validation and query resolution
//!
//! Validation happens entirely here; an invalid form never produces
//! [`QueryParams`], so malformed dates cannot reach the fetch layer.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::QueryParams;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid")
});

/// Days added to the start date when no end date is given
pub const DEFAULT_RANGE_DAYS: u64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Editable form values plus the errors of the last submission
#[derive(Debug, Clone, Default)]
pub struct DateRangeForm {
    pub start_date: String,
    pub end_date: String,
    errors: FieldErrors,
}

impl DateRangeForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form pre-filled with earlier values
    pub fn with_values(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate the current values without touching the form
    pub fn validate(&self) -> FieldErrors {
        let start = self.start_date.trim();
        let end = self.end_date.trim();

        let start_date = if start.is_empty() {
            Some("startDate is required".to_string())
        } else {
            check_date(start)
        };
        let end_date = if end.is_empty() { None } else { check_date(end) };

        FieldErrors { start_date, end_date }
    }

    /// Validate and resolve the query to dispatch.
    ///
    /// An empty end date is filled with start date + 7 days and written back
    /// into the form, so the visible range matches the one queried.
    pub fn submit(&mut self) -> Result<QueryParams, FieldErrors> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            tracing::debug!(errors = ?self.errors, "date range form rejected");
            return Err(self.errors.clone());
        }

        self.start_date = self.start_date.trim().to_string();
        self.end_date = self.end_date.trim().to_string();

        if self.end_date.is_empty() {
            match default_end_date(&self.start_date) {
                Some(end) => self.end_date = end,
                None => {
                    self.errors.start_date = Some("Not a valid date".to_string());
                    return Err(self.errors.clone());
                }
            }
        }

        Ok(QueryParams::new(self.start_date.clone(), Some(self.end_date.clone())))
    }
}

fn check_date(value: &str) -> Option<String> {
    if !DATE_PATTERN.is_match(value) {
        return Some("Use YYYY-MM-DD".to_string());
    }
    if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
        return Some("Not a valid date".to_string());
    }
    None
}

/// `start + 7 days` in `YYYY-MM-DD`, or `None` if `start` is not a date
pub fn default_end_date(start: &str) -> Option<String> {
    NaiveDate::parse_from_str(start, DATE_FORMAT)
        .ok()?
        .checked_add_days(Days::new(DEFAULT_RANGE_DAYS))
        .map(|date| date.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_end_date_is_filled() {
        let mut form = DateRangeForm::with_values("2024-01-01", "");
        let params = form.submit().unwrap();
        assert_eq!(params.start_date, "2024-01-01");
        assert_eq!(params.end_date.as_deref(), Some("2024-01-08"));
        assert_eq!(form.end_date, "2024-01-08");
    }

    #[test]
    fn test_explicit_end_date_is_kept() {
        let mut form = DateRangeForm::with_values("2024-01-01", "2024-01-03");
        let params = form.submit().unwrap();
        assert_eq!(params.end_date.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn test_end_date_crosses_month_and_year() {
        assert_eq!(default_end_date("2023-12-28").as_deref(), Some("2024-01-04"));
        assert_eq!(default_end_date("2024-02-25").as_deref(), Some("2024-03-03"));
        assert_eq!(default_end_date("bogus"), None);
    }

    #[test]
    fn test_start_date_required() {
        let mut form = DateRangeForm::new();
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.start_date.as_deref(), Some("startDate is required"));
        assert!(errors.end_date.is_none());
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_pattern_violations() {
        let mut form = DateRangeForm::with_values("01/02/2024", "2024-1-9");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.start_date.as_deref(), Some("Use YYYY-MM-DD"));
        assert_eq!(errors.end_date.as_deref(), Some("Use YYYY-MM-DD"));
    }

    #[test]
    fn test_impossible_calendar_date() {
        let form = DateRangeForm::with_values("2024-02-30", "");
        assert_eq!(form.validate().start_date.as_deref(), Some("Not a valid date"));
    }

    #[test]
    fn test_errors_clear_after_valid_submit() {
        let mut form = DateRangeForm::new();
        assert!(form.submit().is_err());
        form.start_date = "2024-05-01".to_string();
        assert!(form.submit().is_ok());
        assert!(form.errors().is_empty());
    }
}
