//! Rate conversion and level-payment annuity formula

use crate::loan::{CompoundingFrequency, PaymentFrequency};

/// Convert a nominal annual rate to the effective rate per payment period.
///
/// Compounding and payment frequencies are independent, so the rate goes
/// through the effective annual rate first:
/// `ear = (1 + apr/m)^m - 1`, then `per = (1 + ear)^(1/p) - 1`.
pub fn periodic_rate(
    nominal_annual_rate: f64,
    compounding: CompoundingFrequency,
    payment: PaymentFrequency,
) -> f64 {
    let m = compounding.periods_per_year() as f64;
    let p = payment.periods_per_year() as f64;

    let ear = (1.0 + nominal_annual_rate / m).powf(m) - 1.0;
    (1.0 + ear).powf(1.0 / p) - 1.0
}

/// Level payment that amortizes `present_value` over `periods` payments.
///
/// `rate * pv / (1 - (1 + rate)^-n)`, falling back to straight division at a
/// zero rate where the closed form is 0/0.
pub fn level_payment(rate: f64, periods: u32, present_value: f64) -> f64 {
    if rate == 0.0 {
        return present_value / periods as f64;
    }

    rate * present_value / (1.0 - (1.0 + rate).powi(-(periods as i32)))
}

/// Per-period inflation rate used to deflate payments to start-date money
pub fn inflation_per_period(inflation_annual_rate: f64, payment: PaymentFrequency) -> f64 {
    (1.0 + inflation_annual_rate).powf(1.0 / payment.periods_per_year() as f64) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_compounding_monthly_payments() {
        // Matching frequencies collapse to apr / 12
        let rate = periodic_rate(0.06, CompoundingFrequency::Monthly, PaymentFrequency::Monthly);
        assert_abs_diff_eq!(rate, 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_quarterly_compounding_weekly_payments() {
        let rate = periodic_rate(0.06, CompoundingFrequency::Quarterly, PaymentFrequency::Weekly);

        // 52 weekly periods must reproduce the quarterly-compounded EAR
        let ear_from_weekly = (1.0 + rate).powi(52) - 1.0;
        let ear_quarterly = 1.015_f64.powi(4) - 1.0;
        assert_abs_diff_eq!(ear_from_weekly, ear_quarterly, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_compounding_is_apr() {
        let rate = periodic_rate(0.08, CompoundingFrequency::Annual, PaymentFrequency::Monthly);
        assert_abs_diff_eq!((1.0 + rate).powi(12), 1.08, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate() {
        let rate = periodic_rate(0.0, CompoundingFrequency::SemiAnnual, PaymentFrequency::Biweekly);
        assert_eq!(rate, 0.0);
        assert_abs_diff_eq!(level_payment(rate, 120, 60_000.0), 500.0, epsilon = 1e-12);
    }

    #[test]
    fn test_level_payment_30_year_mortgage() {
        let payment = level_payment(0.005, 360, 100_000.0);
        assert!((payment - 599.55).abs() < 0.01, "Expected ~599.55, got {}", payment);
    }

    #[test]
    fn test_level_payment_zero_present_value() {
        assert_eq!(level_payment(0.005, 360, 0.0), 0.0);
        assert_eq!(level_payment(0.0, 360, 0.0), 0.0);
    }

    #[test]
    fn test_inflation_per_period_compounds_to_annual() {
        let per = inflation_per_period(0.03, PaymentFrequency::Biweekly);
        assert_abs_diff_eq!((1.0 + per).powi(26), 1.03, epsilon = 1e-12);
    }
}
