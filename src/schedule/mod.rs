//! Schedule construction: rate conversion, level payment, dates, and the engine

mod state;
mod engine;
mod rows;
pub mod rate;
pub mod dates;

pub use state::ScheduleState;
pub use engine::{AmortizationEngine, build_schedule, PAYOFF_TOLERANCE, SAFETY_CAP_EXTRA_PERIODS};
pub use rows::{AmortizationSchedule, ScheduleRow, ScheduleSummary, Termination};
pub use rate::{periodic_rate, level_payment};
pub use dates::advance;
