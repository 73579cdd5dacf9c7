//! End-to-end schedule properties through the public API

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use loan_amortization::schedule::{level_payment, PAYOFF_TOLERANCE};
use loan_amortization::{
    build_schedule, compare_extra_payments, CompoundingFrequency, LoanParameters, PaymentFrequency,
    Termination,
};

fn mortgage() -> LoanParameters {
    LoanParameters::new(
        100_000.0,
        0.06,
        30,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
}

fn frequency_grid() -> Vec<LoanParameters> {
    let mut loans = Vec::new();
    for compounding in [
        CompoundingFrequency::Annual,
        CompoundingFrequency::SemiAnnual,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
    ] {
        for payment in [PaymentFrequency::Monthly, PaymentFrequency::Biweekly, PaymentFrequency::Weekly] {
            let mut params = mortgage();
            params.principal = 250_000.0;
            params.nominal_annual_rate = 0.075;
            params.term_years = 25;
            params.compounding_frequency = compounding;
            params.payment_frequency = payment;
            loans.push(params);
        }
    }
    loans
}

#[test]
fn test_thirty_year_mortgage() {
    let schedule = build_schedule(&mortgage()).unwrap();

    assert!((schedule.summary.base_payment - 599.55).abs() < 0.01);
    assert_eq!(schedule.summary.period_count, 360);
    assert_eq!(schedule.summary.termination, Termination::PaidOff);
    assert!(schedule.rows.last().unwrap().balance.abs() < PAYOFF_TOLERANCE);
    assert_abs_diff_eq!(schedule.summary.total_principal, 100_000.0, epsilon = 1e-4);
    assert_abs_diff_eq!(
        schedule.summary.total_payment,
        schedule.summary.total_interest + schedule.summary.total_principal,
        epsilon = 1e-6
    );
}

#[test]
fn test_extra_payment_shortens_loan() {
    let base = build_schedule(&mortgage()).unwrap();

    let mut params = mortgage();
    params.extra_payment_per_period = 200.0;
    let accelerated = build_schedule(&params).unwrap();

    assert!(accelerated.summary.period_count < 360);
    assert!(accelerated.summary.total_interest < base.summary.total_interest);
    assert!(accelerated.summary.total_extra_principal > 0.0);

    let comparison = compare_extra_payments(&params).unwrap();
    assert_eq!(comparison.with_extra.period_count, accelerated.summary.period_count);
    assert_eq!(comparison.without_extra.period_count, base.summary.period_count);
    assert_abs_diff_eq!(
        comparison.interest_saved(),
        base.summary.total_interest - accelerated.summary.total_interest,
        epsilon = 1e-9
    );
}

#[test]
fn test_interest_only_first_year() {
    let mut params = mortgage();
    params.interest_only_months = 12;
    let schedule = build_schedule(&params).unwrap();

    for row in &schedule.rows[..12] {
        assert_eq!(row.principal, 0.0);
        assert_eq!(row.payment, row.interest);
    }
    assert!(schedule.summary.is_paid_off());
}

#[test]
fn test_zero_principal_is_empty() {
    let mut params = mortgage();
    params.principal = 0.0;
    let schedule = build_schedule(&params).unwrap();

    assert!(schedule.is_empty());
    assert_eq!(schedule.summary.period_count, 0);
    assert_eq!(schedule.summary.base_payment, 0.0);
    assert_eq!(schedule.summary.total_interest, 0.0);
    assert_eq!(schedule.summary.total_principal, 0.0);
    assert_eq!(schedule.summary.total_payment, 0.0);
    assert_eq!(schedule.summary.total_escrow, 0.0);
    assert_eq!(schedule.summary.total_extra_principal, 0.0);
    assert!(schedule.summary.is_paid_off());
}

#[test]
fn test_rolled_fees_raise_payment() {
    let plain = build_schedule(&mortgage()).unwrap();

    let mut params = mortgage();
    params.one_time_fees = 5_000.0;
    params.roll_fees_into_loan = true;
    let rolled = build_schedule(&params).unwrap();

    let expected = level_payment(rolled.summary.periodic_rate, 360, 105_000.0);
    assert_abs_diff_eq!(rolled.summary.base_payment, expected, epsilon = 1e-12);
    assert!(rolled.summary.base_payment > plain.summary.base_payment);
    assert_eq!(rolled.summary.fees_rolled_into_loan, 5_000.0);
    assert_eq!(rolled.summary.fees_paid_upfront, 0.0);
    assert_abs_diff_eq!(rolled.summary.total_principal, 105_000.0, epsilon = 1e-4);

    params.roll_fees_into_loan = false;
    let upfront = build_schedule(&params).unwrap();
    assert_eq!(upfront.rows, plain.rows);
    assert_eq!(upfront.summary.fees_paid_upfront, 5_000.0);
}

#[test]
fn test_zero_rate_straight_line() {
    let mut params = mortgage();
    params.nominal_annual_rate = 0.0;
    params.term_years = 10;
    let schedule = build_schedule(&params).unwrap();

    assert_abs_diff_eq!(schedule.summary.base_payment, 100_000.0 / 120.0, epsilon = 1e-12);
    assert_eq!(schedule.summary.total_interest, 0.0);
    for row in &schedule.rows[..schedule.len() - 1] {
        assert_eq!(row.interest, 0.0);
        assert_eq!(row.principal, schedule.summary.base_payment);
    }
}

#[test]
fn test_term_length_across_frequencies() {
    for params in frequency_grid() {
        let schedule = build_schedule(&params).unwrap();
        assert_eq!(
            schedule.summary.period_count,
            params.scheduled_periods(),
            "{} compounding, {} payments",
            params.compounding_frequency,
            params.payment_frequency
        );
    }
}

#[test]
fn test_row_invariants_with_all_modifiers() {
    let mut params = mortgage();
    params.payment_frequency = PaymentFrequency::Biweekly;
    params.compounding_frequency = CompoundingFrequency::SemiAnnual;
    params.extra_payment_per_period = 75.0;
    params.interest_only_months = 9;
    params.escrow_per_month = 350.0;
    params.inflation_annual_rate = 0.025;
    params.one_time_fees = 3_000.0;
    params.roll_fees_into_loan = true;

    let schedule = build_schedule(&params).unwrap();
    assert!(schedule.summary.is_paid_off());

    let mut previous = params.present_value();
    for (i, row) in schedule.rows.iter().enumerate() {
        assert_eq!(row.period as usize, i + 1);
        assert!((row.interest + row.principal - row.payment).abs() < 1e-6);
        assert!(row.balance >= 0.0);
        assert!(row.balance <= previous);
        assert!(row.inflation_adjusted_payment.unwrap() <= row.payment);
        previous = row.balance;
    }

    assert!(schedule.rows.windows(2).all(|w| (w[1].date - w[0].date).num_days() == 14));
}

#[test]
fn test_schedule_is_deterministic() {
    let mut params = mortgage();
    params.extra_payment_per_period = 123.45;
    params.inflation_annual_rate = 0.03;

    let first = build_schedule(&params).unwrap();
    let second = build_schedule(&params).unwrap();
    assert_eq!(first, second);
}
