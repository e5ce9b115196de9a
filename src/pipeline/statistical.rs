use log::info;
use opencv::core::Mat;
use opencv::prelude::*;

use crate::bg_subtract::{StatisticalSettings, create_model};
use crate::capture::FrameSource;
use crate::display::FrameSink;
use crate::error::Result;
use crate::pipeline::run_frames;
use crate::types::{ForegroundModel, RunSummary, SubtractorType};

pub const WINDOW_NAME: &str = "CV Background Subtraction";

/// Foreground separation delegated to one of OpenCV's adaptive models.
pub struct StatisticalPipeline<S: FrameSource> {
    source: S,
    kind: SubtractorType,
    model: Box<dyn ForegroundModel>,
}

impl<S: FrameSource> StatisticalPipeline<S> {
    /// Fails with `InvalidConfiguration` unless `method` is exactly `MOG2` or
    /// `KNN`. The source is dropped unread in that case.
    pub fn new(source: S, method: &str, settings: &StatisticalSettings) -> Result<Self> {
        let kind: SubtractorType = method.parse()?;
        Self::with_kind(source, kind, settings)
    }

    pub fn with_kind(
        source: S,
        kind: SubtractorType,
        settings: &StatisticalSettings,
    ) -> Result<Self> {
        let model = create_model(kind, settings)?;
        Ok(StatisticalPipeline {
            source,
            kind,
            model,
        })
    }

    pub fn kind(&self) -> SubtractorType {
        self.kind
    }

    pub fn run<D: FrameSink>(mut self, display: &mut D) -> Result<RunSummary> {
        info!("starting {} background subtraction", self.kind);
        let model = &mut self.model;
        run_frames(&self.kind.to_string(), &mut self.source, display, |frame| {
            let mask = model.apply(frame)?;
            copy_masked(frame, &mask)
        })
    }
}

/// Copies `frame` pixels where `mask` is nonzero into a zeroed buffer.
pub fn copy_masked(frame: &Mat, mask: &Mat) -> Result<Mat> {
    let mut output = Mat::zeros(frame.rows(), frame.cols(), frame.typ())?.to_mat()?;
    frame.copy_to_masked(&mut output, mask)?;
    Ok(output)
}
