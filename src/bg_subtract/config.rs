use serde::Deserialize;

use crate::bg_subtract::knn::KnnSettings;
use crate::bg_subtract::mog2::Mog2Settings;

/// Tuning for both statistical models. Only the selected one is built.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct StatisticalSettings {
    pub mog2: Mog2Settings,
    pub knn: KnnSettings,
}
