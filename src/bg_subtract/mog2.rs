use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{BackgroundSubtractorMOG2, create_background_subtractor_mog2};

use serde::Deserialize;

use crate::error::Result;
use crate::types::ForegroundModel;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Mog2Settings {
    pub history: i32,
    pub var_threshold: f64,
    pub detect_shadows: bool,
    /// Negative lets OpenCV pick the rate from `history`.
    pub learning_rate: f64,
}

impl Default for Mog2Settings {
    fn default() -> Mog2Settings {
        Mog2Settings {
            history: 500,
            var_threshold: 16.0,
            detect_shadows: true,
            learning_rate: -1.0,
        }
    }
}

pub struct Mog2Subtractor {
    subtractor: Ptr<BackgroundSubtractorMOG2>,
    settings: Mog2Settings,
}

fn mog2_from_settings(
    Mog2Settings {
        history,
        var_threshold,
        detect_shadows,
        learning_rate: _,
    }: Mog2Settings,
) -> Result<Ptr<BackgroundSubtractorMOG2>> {
    Ok(create_background_subtractor_mog2(
        history,
        var_threshold,
        detect_shadows,
    )?)
}

impl Mog2Subtractor {
    pub fn new(settings: Mog2Settings) -> Result<Mog2Subtractor> {
        let subtractor = mog2_from_settings(settings)?;
        Ok(Mog2Subtractor {
            subtractor,
            settings,
        })
    }
}

impl ForegroundModel for Mog2Subtractor {
    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        let mut mask = Mat::default();
        self.subtractor
            .apply(frame, &mut mask, self.settings.learning_rate)?;
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::{Mog2Settings, Mog2Subtractor};
    use crate::types::ForegroundModel;
    use opencv::core::{CV_8U, CV_8UC3, Mat, Scalar};
    use opencv::prelude::*;

    #[test]
    fn static_frame_settles_into_background() {
        let mut model = Mog2Subtractor::new(Mog2Settings::default()).expect("mog2");
        let frame =
            Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all(40.0)).expect("frame");
        let mut mask = Mat::default();
        for _ in 0..30 {
            mask = model.apply(&frame).expect("apply");
        }
        assert_eq!(mask.size().expect("size"), frame.size().expect("size"));
        assert_eq!(mask.typ(), CV_8U);
        assert_eq!(opencv::core::count_non_zero(&mask).expect("count"), 0);
    }
}
