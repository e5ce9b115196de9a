mod config;
pub mod heuristic;
mod knn;
mod mog2;

pub use config::StatisticalSettings;
pub use heuristic::{AreaThresholds, HeuristicConfig, HeuristicStages, HeuristicSubtractor};
pub use knn::{KnnSettings, KnnSubtractor};
pub use mog2::{Mog2Settings, Mog2Subtractor};

use crate::error::Result;
use crate::types::{ForegroundModel, SubtractorType};

pub fn create_model(
    kind: SubtractorType,
    settings: &StatisticalSettings,
) -> Result<Box<dyn ForegroundModel>> {
    Ok(match kind {
        SubtractorType::Mog2 => Box::new(Mog2Subtractor::new(settings.mog2)?),
        SubtractorType::Knn => Box::new(KnnSubtractor::new(settings.knn)?),
    })
}
