pub mod display_window;
pub mod timestep;

pub use display_window::{FrameSink, HighGuiWindow, POLL_DELAY_MS, is_quit_key};
pub use timestep::TimeStep;
