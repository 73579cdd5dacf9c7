//! Payment date sequencing
//!
//! Monthly payments move by calendar months. Biweekly and weekly payments move
//! by exactly 14 and 7 days. Month-end handling follows chrono: a date past the
//! end of the target month clamps to that month's last day, and the schedule
//! keeps the clamped day from then on.

use chrono::{Days, Months, NaiveDate};

use crate::error::{LoanError, Result};
use crate::loan::PaymentFrequency;

/// Advance a date by one payment period
pub fn advance(date: NaiveDate, frequency: PaymentFrequency) -> Result<NaiveDate> {
    let next = match frequency {
        PaymentFrequency::Monthly => date.checked_add_months(Months::new(1)),
        PaymentFrequency::Biweekly => date.checked_add_days(Days::new(14)),
        PaymentFrequency::Weekly => date.checked_add_days(Days::new(7)),
    };

    next.ok_or(LoanError::DateOverflow { date })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_advance_is_calendar_exact() {
        assert_eq!(advance(ymd(2025, 1, 15), PaymentFrequency::Monthly).unwrap(), ymd(2025, 2, 15));
        assert_eq!(advance(ymd(2025, 12, 1), PaymentFrequency::Monthly).unwrap(), ymd(2026, 1, 1));
    }

    #[test]
    fn test_month_end_clamps() {
        assert_eq!(advance(ymd(2025, 1, 31), PaymentFrequency::Monthly).unwrap(), ymd(2025, 2, 28));
        assert_eq!(advance(ymd(2024, 1, 31), PaymentFrequency::Monthly).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_chained_monthly_dates_keep_clamped_day() {
        let feb = advance(ymd(2025, 1, 31), PaymentFrequency::Monthly).unwrap();
        let mar = advance(feb, PaymentFrequency::Monthly).unwrap();
        assert_eq!(feb, ymd(2025, 2, 28));
        assert_eq!(mar, ymd(2025, 3, 28));
    }

    #[test]
    fn test_fixed_interval_frequencies() {
        let start = ymd(2025, 2, 20);
        assert_eq!(advance(start, PaymentFrequency::Biweekly).unwrap(), ymd(2025, 3, 6));
        assert_eq!(advance(start, PaymentFrequency::Weekly).unwrap(), ymd(2025, 2, 27));
        assert_eq!(advance(ymd(2024, 12, 30), PaymentFrequency::Weekly).unwrap(), ymd(2025, 1, 6));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = advance(NaiveDate::MAX, PaymentFrequency::Weekly).unwrap_err();
        assert!(err.is_date_overflow());
    }
}
