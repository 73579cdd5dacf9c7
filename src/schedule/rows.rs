//! Schedule output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{yearly_summary, CumulativeTotals, YearlySummary};

/// Guard added to principal when forming the interest/principal ratio
const RATIO_EPSILON: f64 = 1e-9;

/// A single payment period of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number (1-indexed)
    pub period: u32,
    pub date: NaiveDate,

    /// Scheduled payment plus extra principal, net of any payoff overshoot
    pub payment: f64,
    pub interest: f64,
    /// Principal reduction including extra principal
    pub principal: f64,
    pub extra_principal: f64,

    pub escrow: f64,
    /// payment + escrow
    pub total_outflow: f64,

    /// Balance after this payment
    pub balance: f64,

    /// Payment deflated to start-date money, only when inflation is modelled
    pub inflation_adjusted_payment: Option<f64>,
}

impl ScheduleRow {
    /// Interest paid per unit of principal repaid this period
    pub fn interest_to_principal_ratio(&self) -> f64 {
        self.interest / (self.principal + RATIO_EPSILON)
    }
}

/// How the schedule loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Balance reached zero
    PaidOff,
    /// Iteration cap hit with balance still outstanding
    SafetyCap,
}

/// Totals and derived figures for one schedule run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub base_payment: f64,
    pub periodic_rate: f64,
    /// Rows actually produced
    pub period_count: u32,
    /// Contractual payments over the term
    pub scheduled_periods: u32,

    pub total_interest: f64,
    pub total_principal: f64,
    pub total_payment: f64,
    pub total_escrow: f64,
    pub total_extra_principal: f64,

    pub fees_rolled_into_loan: f64,
    pub fees_paid_upfront: f64,

    pub final_balance: f64,
    pub termination: Termination,
}

impl ScheduleSummary {
    pub fn is_paid_off(&self) -> bool {
        self.termination == Termination::PaidOff
    }

    /// Cash due at closing outside the schedule
    pub fn cash_at_closing(&self) -> f64 {
        self.fees_paid_upfront
    }

    /// Everything the borrower pays: payments, escrow, and upfront fees
    pub fn total_cost(&self) -> f64 {
        self.total_payment + self.total_escrow + self.fees_paid_upfront
    }
}

/// Complete schedule: ordered rows plus summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
    pub summary: ScheduleSummary,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Roll the rows up by calendar year
    pub fn yearly(&self) -> Vec<YearlySummary> {
        yearly_summary(&self.rows)
    }

    /// Running interest and principal totals, lazily
    pub fn cumulative(&self) -> CumulativeTotals<'_> {
        CumulativeTotals::new(&self.rows)
    }
}
