// Domain documents and their request payloads

pub mod stats;
pub mod user;
pub mod validation;
pub mod workout_log;
pub mod workout_plan;

pub use stats::*;
pub use user::*;
pub use workout_log::*;
pub use workout_plan::*;
