//! Core amortization engine: builds the period-by-period schedule

use log::{debug, warn};

use super::rate::{inflation_per_period, level_payment, periodic_rate};
use super::rows::{AmortizationSchedule, ScheduleRow, ScheduleSummary, Termination};
use super::state::ScheduleState;
use crate::error::Result;
use crate::loan::LoanParameters;

/// Balance at or below which the loan counts as paid off
pub const PAYOFF_TOLERANCE: f64 = 1e-6;

/// Periods allowed beyond the contractual term before the loop gives up
pub const SAFETY_CAP_EXTRA_PERIODS: u32 = 6000;

/// Amortization engine for one validated parameter set
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    params: LoanParameters,
    periodic_rate: f64,
    base_payment: f64,
    interest_only_periods: u32,
    escrow_per_period: f64,
    inflation_per_period: Option<f64>,
}

impl AmortizationEngine {
    /// Validate parameters and precompute the rate and level payment.
    ///
    /// Rolled fees are financed before the level payment is computed, so they
    /// raise the payment itself.
    pub fn new(params: LoanParameters) -> Result<Self> {
        params.validate()?;

        let periodic_rate = periodic_rate(
            params.nominal_annual_rate,
            params.compounding_frequency,
            params.payment_frequency,
        );
        let base_payment = level_payment(
            periodic_rate,
            params.scheduled_periods(),
            params.present_value(),
        );
        let inflation_per_period = params
            .has_inflation_adjustment()
            .then(|| inflation_per_period(params.inflation_annual_rate, params.payment_frequency));

        debug!(
            "Engine setup: pv={:.2} rate={:.10} payment={:.6} periods={} io_periods={}",
            params.present_value(),
            periodic_rate,
            base_payment,
            params.scheduled_periods(),
            params.interest_only_periods(),
        );

        Ok(Self {
            periodic_rate,
            base_payment,
            interest_only_periods: params.interest_only_periods(),
            escrow_per_period: params.escrow_per_period(),
            inflation_per_period,
            params,
        })
    }

    pub fn parameters(&self) -> &LoanParameters {
        &self.params
    }

    pub fn periodic_rate(&self) -> f64 {
        self.periodic_rate
    }

    pub fn base_payment(&self) -> f64 {
        self.base_payment
    }

    /// Hard upper bound on rows, even if the balance never reaches zero
    pub fn period_cap(&self) -> u32 {
        self.params.scheduled_periods().saturating_add(SAFETY_CAP_EXTRA_PERIODS)
    }

    /// Run the schedule to payoff or to the safety cap
    pub fn build_schedule(&self) -> Result<AmortizationSchedule> {
        let mut state = ScheduleState::from_parameters(&self.params);
        let mut rows = Vec::with_capacity(self.params.scheduled_periods() as usize);
        let period_cap = self.period_cap();

        while state.is_open(PAYOFF_TOLERANCE, period_cap) {
            let row = self.calculate_period(&state);
            state.record(&row, self.params.payment_frequency)?;
            rows.push(row);
        }

        let termination = if state.balance > PAYOFF_TOLERANCE {
            warn!(
                "Schedule truncated after {} periods with balance {:.2} outstanding",
                state.period_index, state.balance
            );
            Termination::SafetyCap
        } else {
            Termination::PaidOff
        };

        let summary = ScheduleSummary {
            base_payment: self.base_payment,
            periodic_rate: self.periodic_rate,
            period_count: state.period_index,
            scheduled_periods: self.params.scheduled_periods(),
            total_interest: state.total_interest,
            total_principal: state.total_principal,
            total_payment: state.total_payment,
            total_escrow: state.total_escrow,
            total_extra_principal: state.total_extra_principal,
            fees_rolled_into_loan: self.params.rolled_fees(),
            fees_paid_upfront: self.params.upfront_fees(),
            final_balance: state.balance,
            termination,
        };

        Ok(AmortizationSchedule { rows, summary })
    }

    /// Calculate one payment period from the state at its start
    fn calculate_period(&self, state: &ScheduleState) -> ScheduleRow {
        let i = state.period_index;
        let balance = state.balance;
        let interest = balance * self.periodic_rate;

        let (scheduled_payment, scheduled_principal) = if i < self.interest_only_periods {
            (interest, 0.0)
        } else {
            // Floor covers a level payment below accrued interest
            (self.base_payment, (self.base_payment - interest).max(0.0))
        };

        // Extra principal never pays past the outstanding balance
        let mut extra = self.params.extra_payment_per_period;
        if scheduled_principal + extra > balance {
            extra = (balance - scheduled_principal).max(0.0);
        }

        let mut principal = scheduled_principal + extra;
        let mut payment = scheduled_payment + extra;

        // Absorb payoff overshoot so payment == interest + principal and balance lands on 0
        let mut new_balance = balance - principal;
        if new_balance < 0.0 {
            payment += new_balance;
            principal += new_balance;
            new_balance = 0.0;
        }

        let inflation_adjusted_payment = self
            .inflation_per_period
            .map(|per| payment / (1.0 + per).powi(i as i32));

        ScheduleRow {
            period: i + 1,
            date: state.date,
            payment,
            interest,
            principal,
            extra_principal: extra,
            escrow: self.escrow_per_period,
            total_outflow: payment + self.escrow_per_period,
            balance: new_balance,
            inflation_adjusted_payment,
        }
    }
}

/// Validate `params` and build its schedule
pub fn build_schedule(params: &LoanParameters) -> Result<AmortizationSchedule> {
    AmortizationEngine::new(params.clone())?.build_schedule()
}
