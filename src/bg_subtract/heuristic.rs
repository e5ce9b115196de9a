//! Edge/contour foreground heuristic.
//!
//! Every frame is handled on its own: Canny edges on the colour frame, a 3x3
//! dilate/erode to close gaps, contour extraction, then every contour whose
//! area falls strictly between the configured fractions of the frame area is
//! filled as its convex hull. The mask is smoothed once more and used to cut
//! the foreground out of the frame.

use log::{debug, trace};
use opencv::core::{self, BORDER_CONSTANT, CV_8U, CV_64F, Mat, Point, Scalar, Size, Vector};
use opencv::imgproc;
use opencv::prelude::*;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct HeuristicConfig {
    pub canny_low: f64,
    pub canny_high: f64,
    /// Smallest accepted contour area, as a fraction of the frame area (exclusive).
    pub min_area: f64,
    /// Largest accepted contour area, as a fraction of the frame area (exclusive).
    pub max_area: f64,
    pub dilate_iterations: i32,
    pub erode_iterations: i32,
    /// Gaussian kernel size for the mask. Must be odd.
    pub blur: i32,
    /// Use the iteration counts for the edge cleanup instead of a single pass.
    pub honor_iterations: bool,
}

impl Default for HeuristicConfig {
    fn default() -> HeuristicConfig {
        HeuristicConfig {
            canny_low: 15.0,
            canny_high: 150.0,
            min_area: 0.0005,
            max_area: 0.95,
            dilate_iterations: 10,
            erode_iterations: 10,
            blur: 3,
            honor_iterations: false,
        }
    }
}

impl HeuristicConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_area.is_finite() || !self.max_area.is_finite() {
            return Err(Error::invalid("area fractions must be finite"));
        }
        if self.min_area < 0.0 || self.min_area >= self.max_area {
            return Err(Error::invalid(format!(
                "area fractions must satisfy 0 <= min_area < max_area, got {} and {}",
                self.min_area, self.max_area
            )));
        }
        if self.blur < 1 || self.blur % 2 == 0 {
            return Err(Error::invalid(format!(
                "blur kernel size must be odd and positive, got {}",
                self.blur
            )));
        }
        if self.honor_iterations && (self.dilate_iterations < 0 || self.erode_iterations < 0) {
            return Err(Error::invalid("iteration counts must not be negative"));
        }
        Ok(())
    }

    fn edge_iterations(&self) -> (i32, i32) {
        if self.honor_iterations {
            (self.dilate_iterations, self.erode_iterations)
        } else {
            (1, 1)
        }
    }
}

/// Absolute contour-area bounds for one frame size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaThresholds {
    pub min_px: f64,
    pub max_px: f64,
}

impl AreaThresholds {
    pub fn for_frame(config: &HeuristicConfig, width: i32, height: i32) -> AreaThresholds {
        let area = f64::from(width) * f64::from(height);
        AreaThresholds {
            min_px: config.min_area * area,
            max_px: config.max_area * area,
        }
    }

    /// Both bounds are exclusive.
    pub fn accepts(&self, area: f64) -> bool {
        area > self.min_px && area < self.max_px
    }
}

/// Intermediate images of one processed frame.
pub struct HeuristicStages {
    /// Grayscale copy of the input. Edge detection runs on the colour frame,
    /// so nothing downstream reads this.
    pub gray: Mat,
    pub edges: Mat,
    pub accepted: usize,
    /// `CV_8U`, same rows and cols as the input frame.
    pub mask: Mat,
    pub output: Mat,
}

pub struct HeuristicSubtractor {
    config: HeuristicConfig,
}

impl HeuristicSubtractor {
    pub fn new(config: HeuristicConfig) -> Result<HeuristicSubtractor> {
        config.validate()?;
        Ok(HeuristicSubtractor { config })
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Runs the heuristic on a non-empty frame.
    ///
    /// The frame must be 3-channel BGR (`CV_8UC3`), as video sources deliver
    /// it. Anything else fails the grayscale conversion with
    /// [`Error::OpenCv`].
    pub fn process(&self, frame: &Mat) -> Result<HeuristicStages> {
        if frame.channels() != 3 {
            debug!("expected a 3-channel BGR frame, got {} channels", frame.channels());
        }
        let thresholds = AreaThresholds::for_frame(&self.config, frame.cols(), frame.rows());

        let mut gray = Mat::default();
        imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;

        let mut raw_edges = Mat::default();
        imgproc::canny(
            frame,
            &mut raw_edges,
            self.config.canny_low,
            self.config.canny_high,
            3,
            false,
        )?;
        let (dilate_iterations, erode_iterations) = self.config.edge_iterations();
        let edges = erode3x3(&dilate3x3(&raw_edges, dilate_iterations)?, erode_iterations)?;

        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours(
            &edges,
            &mut contours,
            imgproc::RETR_TREE,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )?;

        let mut mask =
            Mat::new_rows_cols_with_default(frame.rows(), frame.cols(), CV_64F, Scalar::all(0.0))?;
        let accepted = fill_accepted_contours(&mut mask, &contours, &thresholds)?;
        trace!(
            "{} of {} contours accepted within {:?}",
            accepted,
            contours.len(),
            thresholds
        );

        let smoothed = erode3x3(&dilate3x3(&mask, 1)?, 1)?;
        let mut blurred = Mat::default();
        let kernel = Size::new(self.config.blur, self.config.blur);
        imgproc::gaussian_blur_def(&smoothed, &mut blurred, kernel, 0.0)?;

        let mut mask8 = Mat::default();
        blurred.convert_to(&mut mask8, CV_8U, 1.0, 0.0)?;

        let output = composite(frame, &mask8)?;

        Ok(HeuristicStages {
            gray,
            edges,
            accepted,
            mask: mask8,
            output,
        })
    }
}

/// Fills the convex hull of every contour whose area `thresholds` accepts.
/// Returns how many were filled.
pub fn fill_accepted_contours(
    mask: &mut Mat,
    contours: &Vector<Vector<Point>>,
    thresholds: &AreaThresholds,
) -> Result<usize> {
    let mut accepted = 0;
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        if !thresholds.accepts(area) {
            continue;
        }
        let mut hull: Vector<Point> = Vector::new();
        imgproc::convex_hull(&contour, &mut hull, false, true)?;
        imgproc::fill_convex_poly(mask, &hull, Scalar::all(255.0), imgproc::LINE_8, 0)?;
        accepted += 1;
    }
    Ok(accepted)
}

/// `frame AND frame` under `mask`, into a freshly zeroed buffer.
pub fn composite(frame: &Mat, mask: &Mat) -> Result<Mat> {
    let mut output = Mat::zeros(frame.rows(), frame.cols(), frame.typ())?.to_mat()?;
    core::bitwise_and(frame, frame, &mut output, mask)?;
    Ok(output)
}

fn dilate3x3(src: &Mat, iterations: i32) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::dilate(
        src,
        &mut dst,
        &Mat::default(),
        Point::new(-1, -1),
        iterations,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    Ok(dst)
}

fn erode3x3(src: &Mat, iterations: i32) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::erode(
        src,
        &mut dst,
        &Mat::default(),
        Point::new(-1, -1),
        iterations,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    Ok(dst)
}
