use log::{debug, info, warn};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::error::{Error, Result};

/// Sequential, blocking supplier of frames.
///
/// End-of-stream is an empty `Mat`, not an error. Callers must check
/// `frame.empty()` on every read.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Mat>;
}

/// True when every character of `s` is an ASCII decimal digit.
///
/// The empty string is all digits too, so it classifies as a device index.
pub fn is_device_index(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Device(i32),
    File(String),
}

impl SourceSpec {
    pub fn parse(identifier: &str) -> Result<SourceSpec> {
        if !is_device_index(identifier) {
            return Ok(SourceSpec::File(identifier.to_string()));
        }
        identifier
            .parse::<i32>()
            .map(SourceSpec::Device)
            .map_err(|e| Error::invalid(format!("device index '{identifier}' is not usable: {e}")))
    }
}

/// A file or camera opened through OpenCV's videoio backends.
///
/// The capture handle is released exactly once, by `VideoCapture`'s own
/// destructor when the source is dropped.
pub struct VideoSource {
    capture: VideoCapture,
    spec: SourceSpec,
}

impl VideoSource {
    /// Opens `identifier` as a device index or a file path.
    ///
    /// A source that cannot be opened is not reported here; its first read
    /// comes back empty.
    pub fn open(identifier: &str) -> Result<VideoSource> {
        let spec = SourceSpec::parse(identifier)?;
        let capture = match &spec {
            SourceSpec::Device(index) => VideoCapture::new(*index, videoio::CAP_ANY)?,
            SourceSpec::File(path) => VideoCapture::from_file(path, videoio::CAP_ANY)?,
        };
        info!("opened {spec:?}");
        Ok(VideoSource { capture, spec })
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        match self.capture.read(&mut frame) {
            Ok(true) => Ok(frame),
            Ok(false) => Ok(Mat::default()),
            Err(error) => {
                warn!("read from {:?} failed, treating as end of stream: {error}", self.spec);
                Ok(Mat::default())
            }
        }
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        debug!("releasing {:?}", self.spec);
    }
}
