//! Domain models for the glucose tracker.

mod blood_pressure;
mod prediction;
mod reading;
mod reminder;
mod user;

pub use blood_pressure::*;
pub use prediction::*;
pub use reading::*;
pub use reminder::*;
pub use user::*;
