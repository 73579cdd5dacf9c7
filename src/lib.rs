//! Loan Amortization - deterministic period-by-period loan schedules
//!
//! This library provides:
//! - Nominal-to-periodic rate conversion with independent compounding and payment frequencies
//! - Level-payment (annuity) calculation
//! - The amortization engine: interest-only windows, extra payments, escrow,
//!   fee rolling, and inflation-adjusted payments
//! - Yearly roll-ups, cumulative totals, and the extra-payment comparison
//! - CSV export and markdown reports

pub mod error;
pub mod loan;
pub mod schedule;
pub mod aggregate;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{LoanError, Result};
pub use loan::{LoanParameters, CompoundingFrequency, PaymentFrequency};
pub use schedule::{AmortizationEngine, AmortizationSchedule, ScheduleRow, ScheduleSummary, Termination, build_schedule};
pub use aggregate::{YearlySummary, yearly_summary};
pub use scenario::{ExtraPaymentComparison, compare_extra_payments, compare_with_schedule};
