//! Analytical core: classification, trends, prediction and text reports.
//!
//! Everything here is a pure function of its inputs and the configuration
//! it was built with; nothing touches storage.

mod classifier;
mod predictor;
pub mod report;
mod trend;

pub use classifier::*;
pub use predictor::*;
pub use trend::*;
