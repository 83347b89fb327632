//! Core abstractions shared by providers and the runner

pub mod error;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use error::RateError;
pub use rate::{CurrencyRate, CurrencySource};
