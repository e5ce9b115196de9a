use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{BackgroundSubtractorKNN, create_background_subtractor_knn};

use serde::Deserialize;

use crate::error::Result;
use crate::types::ForegroundModel;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct KnnSettings {
    pub history: i32,
    pub dist2_threshold: f64,
    pub detect_shadows: bool,
    pub learning_rate: f64,
}

impl Default for KnnSettings {
    fn default() -> KnnSettings {
        KnnSettings {
            history: 500,
            dist2_threshold: 400.0,
            detect_shadows: true,
            learning_rate: -1.0,
        }
    }
}

pub struct KnnSubtractor {
    subtractor: Ptr<BackgroundSubtractorKNN>,
    settings: KnnSettings,
}

fn knn_from_settings(
    KnnSettings {
        history,
        dist2_threshold,
        detect_shadows,
        learning_rate: _,
    }: KnnSettings,
) -> Result<Ptr<BackgroundSubtractorKNN>> {
    Ok(create_background_subtractor_knn(
        history,
        dist2_threshold,
        detect_shadows,
    )?)
}

impl KnnSubtractor {
    pub fn new(settings: KnnSettings) -> Result<KnnSubtractor> {
        let subtractor = knn_from_settings(settings)?;
        Ok(KnnSubtractor {
            subtractor,
            settings,
        })
    }
}

impl ForegroundModel for KnnSubtractor {
    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        let mut mask = Mat::default();
        self.subtractor
            .apply(frame, &mut mask, self.settings.learning_rate)?;
        Ok(mask)
    }
}
