//! Foreground isolation for video files and live cameras.
//!
//! Two pipelines share the same frame loop: [`StatisticalPipeline`] hands each
//! frame to an OpenCV adaptive background model, [`HeuristicPipeline`] builds
//! a mask from Canny edges and contour areas. Frames come from a
//! [`FrameSource`] and go to a [`FrameSink`], both of which are traits so the
//! loops can run without a camera or a window.

pub mod bg_subtract;
pub mod capture;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod types;

pub use capture::{FrameSource, VideoSource};
pub use display::FrameSink;
pub use error::{Error, Result};
pub use pipeline::{HeuristicPipeline, StatisticalPipeline};
