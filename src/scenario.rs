//! Counterfactual comparison: the same loan with and without extra payments
//!
//! Each side is an independent engine invocation over its own parameter copy,
//! so the two runs execute concurrently with no shared state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loan::LoanParameters;
use crate::schedule::{build_schedule, AmortizationSchedule, Termination};

/// Headline figures for one side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTotals {
    pub scenario: String,
    pub total_interest: f64,
    pub period_count: u32,
    pub total_payment: f64,
    pub termination: Termination,
}

impl ScenarioTotals {
    fn from_schedule(scenario: &str, schedule: &AmortizationSchedule) -> Self {
        Self {
            scenario: scenario.to_string(),
            total_interest: schedule.summary.total_interest,
            period_count: schedule.summary.period_count,
            total_payment: schedule.summary.total_payment,
            termination: schedule.summary.termination,
        }
    }
}

/// Side-by-side totals for the configured extra payment versus none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentComparison {
    pub with_extra: ScenarioTotals,
    pub without_extra: ScenarioTotals,
}

impl ExtraPaymentComparison {
    fn from_schedules(with_extra: &AmortizationSchedule, without_extra: &AmortizationSchedule) -> Self {
        Self {
            with_extra: ScenarioTotals::from_schedule("With Extra Payments", with_extra),
            without_extra: ScenarioTotals::from_schedule("Without Extra Payments", without_extra),
        }
    }

    /// Interest avoided by paying extra (negative if extra payments cost more)
    pub fn interest_saved(&self) -> f64 {
        self.without_extra.total_interest - self.with_extra.total_interest
    }

    /// Payments avoided by paying extra
    pub fn periods_saved(&self) -> i64 {
        self.without_extra.period_count as i64 - self.with_extra.period_count as i64
    }
}

/// Run the loan as configured and again with the extra payment forced to zero
pub fn compare_extra_payments(params: &LoanParameters) -> Result<ExtraPaymentComparison> {
    let baseline = params.without_extra_payment();

    let (with_extra, without_extra) = rayon::join(
        || build_schedule(params),
        || build_schedule(&baseline),
    );

    Ok(ExtraPaymentComparison::from_schedules(&with_extra?, &without_extra?))
}

/// Compare a schedule already built from `params` against the no-extra run.
///
/// Only the counterfactual is computed, and not even that when there is no
/// extra payment to remove.
pub fn compare_with_schedule(
    params: &LoanParameters,
    schedule: &AmortizationSchedule,
) -> Result<ExtraPaymentComparison> {
    if params.extra_payment_per_period == 0.0 {
        return Ok(ExtraPaymentComparison::from_schedules(schedule, schedule));
    }

    let baseline = build_schedule(&params.without_extra_payment())?;
    Ok(ExtraPaymentComparison::from_schedules(schedule, &baseline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_loan() -> LoanParameters {
        LoanParameters::new(
            100_000.0,
            0.06,
            30,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_extra_payment_saves_interest_and_time() {
        let mut params = test_loan();
        params.extra_payment_per_period = 200.0;

        let comparison = compare_extra_payments(&params).unwrap();

        assert_eq!(comparison.without_extra.period_count, 360);
        assert!(comparison.with_extra.period_count < 360);
        assert!(comparison.interest_saved() > 0.0);
        assert!(comparison.periods_saved() > 0);
        assert_eq!(comparison.with_extra.scenario, "With Extra Payments");
    }

    #[test]
    fn test_no_extra_payment_is_identical() {
        let comparison = compare_extra_payments(&test_loan()).unwrap();

        assert_eq!(comparison.interest_saved(), 0.0);
        assert_eq!(comparison.periods_saved(), 0);
    }

    #[test]
    fn test_compare_with_existing_schedule_matches_full_comparison() {
        let mut params = test_loan();
        params.extra_payment_per_period = 200.0;
        let schedule = build_schedule(&params).unwrap();

        let reused = compare_with_schedule(&params, &schedule).unwrap();
        assert_eq!(reused, compare_extra_payments(&params).unwrap());
        assert_eq!(reused.with_extra.period_count, schedule.summary.period_count);

        let plain = test_loan();
        let schedule = build_schedule(&plain).unwrap();
        let reused = compare_with_schedule(&plain, &schedule).unwrap();
        assert_eq!(reused.without_extra.period_count, 360);
        assert_eq!(reused.interest_saved(), 0.0);
    }

    #[test]
    fn test_comparison_propagates_validation_error() {
        let mut params = test_loan();
        params.principal = -1.0;
        assert!(compare_extra_payments(&params).unwrap_err().is_validation());
    }
}
