use opencv::core::Mat;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// OpenCV adaptive background models that can back the statistical pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtractorType {
    Mog2,
    Knn,
}

impl FromStr for SubtractorType {
    type Err = Error;

    fn from_str(method: &str) -> Result<SubtractorType> {
        match method {
            "MOG2" => Ok(SubtractorType::Mog2),
            "KNN" => Ok(SubtractorType::Knn),
            other => Err(Error::invalid(format!(
                "the method must be 'MOG2' or 'KNN', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SubtractorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtractorType::Mog2 => write!(f, "MOG2"),
            SubtractorType::Knn => write!(f, "KNN"),
        }
    }
}

/// A model with per-pixel state that evolves with every frame it sees.
pub trait ForegroundModel {
    /// Feeds `frame` into the model and returns its single-channel mask.
    fn apply(&mut self, frame: &Mat) -> Result<Mat>;
}
