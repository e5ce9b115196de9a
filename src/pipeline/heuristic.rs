use log::{debug, info};

use crate::bg_subtract::{HeuristicConfig, HeuristicSubtractor};
use crate::capture::FrameSource;
use crate::display::FrameSink;
use crate::error::Result;
use crate::pipeline::run_frames;
use crate::types::RunSummary;

pub const WINDOW_NAME: &str = "Background Subtraction";

/// Edge/contour foreground extraction with no memory between frames.
pub struct HeuristicPipeline<S: FrameSource> {
    source: S,
    subtractor: HeuristicSubtractor,
}

impl<S: FrameSource> HeuristicPipeline<S> {
    /// Validates `config` before anything is read from `source`.
    pub fn new(source: S, config: HeuristicConfig) -> Result<Self> {
        let subtractor = HeuristicSubtractor::new(config)?;
        Ok(HeuristicPipeline { source, subtractor })
    }

    pub fn run<D: FrameSink>(mut self, display: &mut D) -> Result<RunSummary> {
        let config = self.subtractor.config();
        info!(
            "starting heuristic subtraction, canny {}/{}, area {}..{}",
            config.canny_low, config.canny_high, config.min_area, config.max_area
        );
        if !config.honor_iterations {
            debug!(
                "single-pass edge cleanup, ignoring dilate {} / erode {} iterations",
                config.dilate_iterations, config.erode_iterations
            );
        }

        let subtractor = &self.subtractor;
        run_frames("heuristic", &mut self.source, display, |frame| {
            Ok(subtractor.process(frame)?.output)
        })
    }
}
