//! Loan parameter set consumed by the amortization engine

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LoanError, Result};
use crate::schedule::SAFETY_CAP_EXTRA_PERIODS;

/// How often interest compounds within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompoundingFrequency {
    Annual,
    SemiAnnual,
    Quarterly,
    #[default]
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompoundingFrequency::Annual => "Annual",
            CompoundingFrequency::SemiAnnual => "Biannual",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
        }
    }
}

impl TryFrom<u32> for CompoundingFrequency {
    type Error = LoanError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(CompoundingFrequency::Annual),
            2 => Ok(CompoundingFrequency::SemiAnnual),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            other => Err(LoanError::unsupported_frequency("compounding", other)),
        }
    }
}

impl From<CompoundingFrequency> for u32 {
    fn from(freq: CompoundingFrequency) -> u32 {
        freq.periods_per_year()
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.periods_per_year())
    }
}

/// How often the borrower makes a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::Biweekly => "Biweekly",
            PaymentFrequency::Weekly => "Weekly",
        }
    }
}

impl TryFrom<u32> for PaymentFrequency {
    type Error = LoanError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            12 => Ok(PaymentFrequency::Monthly),
            26 => Ok(PaymentFrequency::Biweekly),
            52 => Ok(PaymentFrequency::Weekly),
            other => Err(LoanError::unsupported_frequency("payment", other)),
        }
    }
}

impl From<PaymentFrequency> for u32 {
    fn from(freq: PaymentFrequency) -> u32 {
        freq.periods_per_year()
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.periods_per_year())
    }
}

/// Complete input for one schedule run.
///
/// Rates are fractions (0.06 for 6%). Every modifier defaults to zero/off when
/// omitted from a JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, before any rolled-in fees
    pub principal: f64,

    /// Nominal annual rate (APR) before compounding adjustment
    pub nominal_annual_rate: f64,

    #[serde(default)]
    pub compounding_frequency: CompoundingFrequency,

    #[serde(default)]
    pub payment_frequency: PaymentFrequency,

    /// Term length in whole years
    pub term_years: u32,

    /// Date of the first payment
    pub start_date: NaiveDate,

    /// Additional principal paid every period
    #[serde(default)]
    pub extra_payment_per_period: f64,

    /// Interest-only window, in months regardless of payment frequency
    #[serde(default)]
    pub interest_only_months: u32,

    /// Monthly escrow (tax/insurance/HOA), spread over payment periods
    #[serde(default)]
    pub escrow_per_month: f64,

    /// Expected annual inflation, used only for the informational adjusted payment
    #[serde(default)]
    pub inflation_annual_rate: f64,

    /// One-time fees (origination, closing)
    #[serde(default)]
    pub one_time_fees: f64,

    /// Add fees to the financed amount instead of paying them upfront
    #[serde(default)]
    pub roll_fees_into_loan: bool,
}

impl LoanParameters {
    /// Plain amortizing loan with monthly compounding and monthly payments
    pub fn new(principal: f64, nominal_annual_rate: f64, term_years: u32, start_date: NaiveDate) -> Self {
        Self {
            principal,
            nominal_annual_rate,
            compounding_frequency: CompoundingFrequency::Monthly,
            payment_frequency: PaymentFrequency::Monthly,
            term_years,
            start_date,
            extra_payment_per_period: 0.0,
            interest_only_months: 0,
            escrow_per_month: 0.0,
            inflation_annual_rate: 0.0,
            one_time_fees: 0.0,
            roll_fees_into_loan: false,
        }
    }

    /// Reject inputs the engine cannot amortize
    pub fn validate(&self) -> Result<()> {
        check_amount("principal", self.principal)?;
        check_amount("nominal_annual_rate", self.nominal_annual_rate)?;
        check_amount("extra_payment_per_period", self.extra_payment_per_period)?;
        check_amount("escrow_per_month", self.escrow_per_month)?;
        check_amount("inflation_annual_rate", self.inflation_annual_rate)?;
        check_amount("one_time_fees", self.one_time_fees)?;

        if self.term_years == 0 {
            return Err(LoanError::invalid_parameter(
                "term_years",
                0.0,
                "term must be at least one year",
            ));
        }

        // Period counts, the safety cap, and inflation exponents must fit in i32
        let period_cap = self
            .term_years
            .checked_mul(self.payment_frequency.periods_per_year())
            .and_then(|periods| periods.checked_add(SAFETY_CAP_EXTRA_PERIODS))
            .filter(|&cap| cap <= i32::MAX as u32);
        if period_cap.is_none() {
            return Err(LoanError::invalid_parameter(
                "term_years",
                self.term_years as f64,
                "term has too many payment periods",
            ));
        }

        Ok(())
    }

    /// Financed amount: principal plus fees when they are rolled in
    pub fn present_value(&self) -> f64 {
        self.principal + self.rolled_fees()
    }

    pub fn rolled_fees(&self) -> f64 {
        if self.roll_fees_into_loan { self.one_time_fees } else { 0.0 }
    }

    pub fn upfront_fees(&self) -> f64 {
        if self.roll_fees_into_loan { 0.0 } else { self.one_time_fees }
    }

    /// Contractual number of payments over the term
    pub fn scheduled_periods(&self) -> u32 {
        self.term_years.saturating_mul(self.payment_frequency.periods_per_year())
    }

    /// Interest-only months converted to payment periods.
    ///
    /// Ties round to even, so 3 months of biweekly payments is 6 periods.
    pub fn interest_only_periods(&self) -> u32 {
        let periods = self.interest_only_months as f64
            * self.payment_frequency.periods_per_year() as f64
            / 12.0;
        periods.round_ties_even() as u32
    }

    pub fn escrow_per_period(&self) -> f64 {
        self.escrow_per_month * (12.0 / self.payment_frequency.periods_per_year() as f64)
    }

    pub fn has_inflation_adjustment(&self) -> bool {
        self.inflation_annual_rate > 0.0
    }

    /// Same loan with the extra payment removed, for the counterfactual run
    pub fn without_extra_payment(&self) -> Self {
        Self {
            extra_payment_per_period: 0.0,
            ..self.clone()
        }
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LoanError::invalid_parameter(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(LoanError::invalid_parameter(field, value, "must be non-negative"));
    }
    Ok(())
}
