//! Per-frame loops. Both pipelines read, transform, display and poll in
//! strict sequence on the calling thread.

pub mod heuristic;
pub mod statistical;

pub use heuristic::HeuristicPipeline;
pub use statistical::StatisticalPipeline;

use log::{debug, info, trace, warn};
use opencv::core::Mat;
use opencv::prelude::*;

use crate::capture::FrameSource;
use crate::display::{FrameSink, TimeStep, is_quit_key};
use crate::error::Result;
use crate::types::{RunSummary, StopReason};

fn run_frames<S, D, F>(
    label: &str,
    source: &mut S,
    display: &mut D,
    mut step: F,
) -> Result<RunSummary>
where
    S: FrameSource,
    D: FrameSink,
    F: FnMut(&Mat) -> Result<Mat>,
{
    let mut timestep = TimeStep::new();
    let mut frames = 0;
    let stop = loop {
        let frame = source.next_frame()?;
        if frame.empty() {
            break StopReason::EndOfStream;
        }

        let output = step(&frame)?;
        frames += 1;
        timestep.update();
        match timestep.fps() {
            Some(fps) => trace!(
                "{label}: frame {frames} took {:.1} ms, {fps:.1} fps",
                timestep.time_delta
            ),
            None => trace!("{label}: frame {frames} took {:.1} ms", timestep.time_delta),
        }

        if let Some(key) = display.present(&output)? {
            debug!("{label}: key {key}");
            if is_quit_key(key) {
                break StopReason::UserQuit;
            }
        }
    };

    if frames == 0 && stop == StopReason::EndOfStream {
        warn!("{label}: source produced no frames, it may not have opened");
    }
    match timestep.fps() {
        Some(fps) => info!("{label}: stopped ({stop:?}) after {frames} frames, {fps:.1} fps"),
        None => info!("{label}: stopped ({stop:?}) after {frames} frames"),
    }
    Ok(RunSummary { frames, stop })
}
