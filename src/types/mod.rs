pub mod bg_subtract_types;
pub mod pipeline_types;

pub use bg_subtract_types::{ForegroundModel, SubtractorType};
pub use pipeline_types::{RunSummary, StopReason};
