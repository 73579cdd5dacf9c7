//! Loan parameter structures and config loading

mod params;
pub mod loader;

pub use params::{LoanParameters, CompoundingFrequency, PaymentFrequency};
pub use loader::{load_parameters, load_parameters_from_reader};
