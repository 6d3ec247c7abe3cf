//! Return-deadline arithmetic.

use crate::error::{ReturnlyError, ReturnlyResult};
use chrono::{Days, NaiveDate};

/// Compute the last day a purchase can be returned.
///
/// Pure calendar-day arithmetic: adds `window_days` whole days to the
/// transaction date, rolling over month and year boundaries. Time of day and
/// the caller's timezone never enter the calculation.
pub fn return_deadline(transaction_date: NaiveDate, window_days: i64) -> ReturnlyResult<NaiveDate> {
    if window_days < 0 {
        return Err(ReturnlyError::InvalidInput(format!(
            "Return window cannot be negative ({window_days} days)"
        )));
    }

    transaction_date
        .checked_add_days(Days::new(window_days as u64))
        .ok_or_else(|| {
            ReturnlyError::InvalidInput(format!(
                "Return window of {window_days} days from {transaction_date} overflows the calendar"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rolls_over_month_boundary() {
        assert_eq!(
            return_deadline(date(2025, 3, 20), 30).unwrap(),
            date(2025, 4, 19)
        );
        assert_eq!(
            return_deadline(date(2025, 3, 25), 30).unwrap(),
            date(2025, 4, 24)
        );
        assert_eq!(
            return_deadline(date(2025, 3, 30), 15).unwrap(),
            date(2025, 4, 14)
        );
    }

    #[test]
    fn rolls_over_year_boundary() {
        assert_eq!(
            return_deadline(date(2025, 12, 20), 30).unwrap(),
            date(2026, 1, 19)
        );
    }

    #[test]
    fn handles_leap_february() {
        assert_eq!(
            return_deadline(date(2024, 2, 1), 30).unwrap(),
            date(2024, 3, 2)
        );
        assert_eq!(
            return_deadline(date(2025, 2, 1), 30).unwrap(),
            date(2025, 3, 3)
        );
    }

    #[test]
    fn zero_window_is_the_purchase_date() {
        assert_eq!(
            return_deadline(date(2025, 3, 20), 0).unwrap(),
            date(2025, 3, 20)
        );
    }

    #[test]
    fn negative_window_is_rejected() {
        let err = return_deadline(date(2025, 3, 20), -1).unwrap_err();
        assert!(matches!(err, ReturnlyError::InvalidInput(_)));
    }
}
