use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use opencv::core::{CV_8UC3, Mat, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use silhouette::bg_subtract::{HeuristicConfig, HeuristicSubtractor, StatisticalSettings};
use silhouette::types::{StopReason, SubtractorType};
use silhouette::{
    Error, FrameSink, FrameSource, HeuristicPipeline, Result, StatisticalPipeline, VideoSource,
};

#[derive(Default)]
struct Counters {
    reads: Cell<usize>,
    releases: Cell<usize>,
}

/// Serves its frames, then empty frames forever.
struct ScriptedSource {
    frames: VecDeque<Mat>,
    counters: Rc<Counters>,
}

impl ScriptedSource {
    fn new(frames: Vec<Mat>) -> (ScriptedSource, Rc<Counters>) {
        let counters = Rc::new(Counters::default());
        let source = ScriptedSource {
            frames: frames.into(),
            counters: Rc::clone(&counters),
        };
        (source, counters)
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Mat> {
        self.counters.reads.set(self.counters.reads.get() + 1);
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.counters.releases.set(self.counters.releases.get() + 1);
    }
}

/// Records what it was shown and presses `quit_after`'s key on that cycle.
#[derive(Default)]
struct RecordingDisplay {
    shown: Vec<Mat>,
    quit_after: Option<(usize, i32)>,
}

impl FrameSink for RecordingDisplay {
    fn present(&mut self, frame: &Mat) -> Result<Option<i32>> {
        self.shown.push(frame.clone());
        Ok(match self.quit_after {
            Some((n, key)) if self.shown.len() == n => Some(key),
            _ => None,
        })
    }
}

fn scene(offset: i32) -> Mat {
    let mut frame =
        Mat::new_rows_cols_with_default(120, 160, CV_8UC3, Scalar::all(20.0)).expect("frame");
    imgproc::rectangle(
        &mut frame,
        Rect::new(40 + offset, 30, 50, 40),
        Scalar::new(220.0, 210.0, 200.0, 0.0),
        -1,
        imgproc::LINE_8,
        0,
    )
    .expect("draw");
    frame
}

fn heuristic_config() -> HeuristicConfig {
    HeuristicConfig {
        min_area: 0.01,
        max_area: 0.5,
        ..HeuristicConfig::default()
    }
}

#[test]
fn heuristic_runs_three_frames_then_stops() {
    let (source, counters) = ScriptedSource::new(vec![scene(0), scene(5), scene(10)]);
    let mut display = RecordingDisplay::default();

    let summary = HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(display.shown.len(), 3);
    assert_eq!(counters.reads.get(), 4);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn outputs_match_input_dimensions() {
    let (source, _) = ScriptedSource::new(vec![scene(0)]);
    let mut display = RecordingDisplay::default();
    HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");

    let shown = &display.shown[0];
    assert_eq!(shown.rows(), 120);
    assert_eq!(shown.cols(), 160);
    assert_eq!(shown.typ(), CV_8UC3);
}

#[test]
fn heuristic_is_repeatable_on_a_static_frame() {
    let run_once = || {
        let (source, _) = ScriptedSource::new(vec![scene(0)]);
        let mut display = RecordingDisplay::default();
        HeuristicPipeline::new(source, heuristic_config())
            .expect("valid config")
            .run(&mut display)
            .expect("run");
        display.shown.remove(0)
    };
    let first = run_once();
    let second = run_once();
    assert_eq!(
        first.data_bytes().expect("bytes"),
        second.data_bytes().expect("bytes")
    );

    let subtractor = HeuristicSubtractor::new(heuristic_config()).expect("valid config");
    let frame = scene(0);
    let a = subtractor.process(&frame).expect("process");
    let b = subtractor.process(&frame).expect("process");
    assert_eq!(a.mask.data_bytes().expect("bytes"), b.mask.data_bytes().expect("bytes"));
}

#[test]
fn output_is_reset_every_cycle() {
    // second frame is flat, so nothing from the first may survive
    let flat =
        Mat::new_rows_cols_with_default(120, 160, CV_8UC3, Scalar::all(20.0)).expect("frame");
    let (source, _) = ScriptedSource::new(vec![scene(0), flat]);
    let mut display = RecordingDisplay::default();
    HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");

    assert!(opencv::core::count_non_zero(&gray(&display.shown[0])).expect("count") > 0);
    assert_eq!(opencv::core::count_non_zero(&gray(&display.shown[1])).expect("count"), 0);
}

fn gray(frame: &Mat) -> Mat {
    let mut out = Mat::default();
    imgproc::cvt_color_def(frame, &mut out, imgproc::COLOR_BGR2GRAY).expect("gray");
    out
}

#[test]
fn quit_key_stops_the_loop() {
    for key in ['q' as i32, 27] {
        let (source, counters) = ScriptedSource::new(vec![scene(0), scene(1), scene(2)]);
        let mut display = RecordingDisplay {
            quit_after: Some((2, key)),
            ..RecordingDisplay::default()
        };
        let summary = HeuristicPipeline::new(source, heuristic_config())
            .expect("valid config")
            .run(&mut display)
            .expect("run");

        assert_eq!(summary.stop, StopReason::UserQuit);
        assert_eq!(summary.frames, 2);
        assert_eq!(counters.reads.get(), 2);
        assert_eq!(counters.releases.get(), 1);
    }
}

#[test]
fn other_keys_do_not_quit() {
    let (source, _) = ScriptedSource::new(vec![scene(0), scene(1)]);
    let mut display = RecordingDisplay {
        quit_after: Some((1, 'x' as i32)),
        ..RecordingDisplay::default()
    };
    let summary = HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.stop, StopReason::EndOfStream);
}

#[test]
fn empty_source_ends_immediately() {
    let (source, counters) = ScriptedSource::new(Vec::new());
    let mut display = RecordingDisplay::default();
    let summary = HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.exit_code(), 0);
    assert!(display.shown.is_empty());
    assert_eq!(counters.reads.get(), 1);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn missing_video_file_is_a_clean_empty_run() {
    let source = VideoSource::open("does/not/exist.avi").expect("open is lazy");
    let mut display = RecordingDisplay::default();
    let summary = HeuristicPipeline::new(source, heuristic_config())
        .expect("valid config")
        .run(&mut display)
        .expect("run");

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.exit_code(), 0);
    assert!(display.shown.is_empty());
}

#[test]
fn even_blur_is_rejected_before_reading() {
    let (source, counters) = ScriptedSource::new(vec![scene(0)]);
    let config = HeuristicConfig {
        blur: 4,
        ..heuristic_config()
    };
    let err = HeuristicPipeline::new(source, config)
        .err()
        .expect("even blur rejected");

    assert!(matches!(err, Error::InvalidConfiguration(_)));
    assert_eq!(err.exit_code(), -1);
    assert_eq!(counters.reads.get(), 0);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn invalid_method_is_rejected_before_reading() {
    let (source, counters) = ScriptedSource::new(vec![scene(0)]);
    let err = StatisticalPipeline::new(source, "INVALID", &StatisticalSettings::default())
        .err()
        .expect("invalid method rejected");

    assert!(matches!(err, Error::InvalidConfiguration(_)));
    assert_eq!(err.exit_code(), -1);
    assert_eq!(counters.reads.get(), 0);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn statistical_runs_both_models_to_the_end() {
    for method in ["MOG2", "KNN"] {
        let (source, counters) = ScriptedSource::new(vec![scene(0), scene(0), scene(8)]);
        let mut display = RecordingDisplay::default();
        let pipeline = StatisticalPipeline::new(source, method, &StatisticalSettings::default())
            .expect("valid method");
        assert_eq!(pipeline.kind().to_string(), method);

        let summary = pipeline.run(&mut display).expect("run");
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.stop, StopReason::EndOfStream);
        assert_eq!(counters.reads.get(), 4);
        assert_eq!(counters.releases.get(), 1);
        for shown in &display.shown {
            assert_eq!(shown.size().expect("size"), scene(0).size().expect("size"));
        }
    }
}

#[test]
fn statistical_keeps_only_moving_pixels_once_trained() {
    let settings = StatisticalSettings::default();
    let mut frames: Vec<Mat> = (0..30).map(|_| scene(0)).collect();
    frames.push(scene(40));
    let (source, _) = ScriptedSource::new(frames);
    let mut display = RecordingDisplay::default();
    StatisticalPipeline::with_kind(source, SubtractorType::Mog2, &settings)
        .expect("model")
        .run(&mut display)
        .expect("run");

    let last = display.shown.last().expect("frames shown");
    // far corner never changes and stays background
    let corner = last.at_2d::<opencv::core::Vec3b>(115, 5).expect("corner");
    assert_eq!(corner.0, [0, 0, 0]);
}
