//! Running state carried between schedule periods

use chrono::NaiveDate;

use super::dates::advance;
use super::rows::ScheduleRow;
use crate::error::Result;
use crate::loan::{LoanParameters, PaymentFrequency};

/// Loan state at the start of a payment period
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Periods already emitted (0-indexed position of the next period)
    pub period_index: u32,

    /// Due date of this period's payment
    pub date: NaiveDate,

    /// Outstanding balance before this period's payment
    pub balance: f64,

    pub total_interest: f64,
    pub total_principal: f64,
    pub total_payment: f64,
    pub total_escrow: f64,
    pub total_extra_principal: f64,
}

impl ScheduleState {
    /// Initialize state at the first payment, with rolled fees financed
    pub fn from_parameters(params: &LoanParameters) -> Self {
        Self {
            period_index: 0,
            date: params.start_date,
            balance: params.present_value(),
            total_interest: 0.0,
            total_principal: 0.0,
            total_payment: 0.0,
            total_escrow: 0.0,
            total_extra_principal: 0.0,
        }
    }

    /// Whether another period should be computed
    pub fn is_open(&self, tolerance: f64, period_cap: u32) -> bool {
        self.balance > tolerance && self.period_index < period_cap
    }

    /// Accumulate a finished row and move to the next period's date
    pub fn record(&mut self, row: &ScheduleRow, frequency: PaymentFrequency) -> Result<()> {
        self.total_interest += row.interest;
        self.total_principal += row.principal;
        self.total_payment += row.payment;
        self.total_escrow += row.escrow;
        self.total_extra_principal += row.extra_principal;

        self.balance = row.balance;
        self.date = advance(self.date, frequency)?;
        self.period_index += 1;
        Ok(())
    }
}
