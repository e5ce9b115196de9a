use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bg_subtract::HeuristicConfig;

#[derive(Parser, Debug)]
#[command(
    name = "silhouette",
    version,
    about = "Isolate foreground objects in a video file or camera stream"
)]
pub struct Cli {
    /// TOML file with [heuristic] and [statistical] tables
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Video file path, or a camera index such as 0
    pub source: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Subtract with an OpenCV adaptive background model
    Statistical {
        /// MOG2 or KNN
        #[arg(long, default_value = "MOG2")]
        method: String,
    },
    /// Subtract with the edge and contour heuristic
    Heuristic(HeuristicArgs),
}

/// Heuristic overrides. Anything left out comes from the config file, then the defaults.
#[derive(clap::Args, Debug, Default)]
pub struct HeuristicArgs {
    #[arg(long)]
    pub canny_low: Option<f64>,
    #[arg(long)]
    pub canny_high: Option<f64>,
    /// Smallest contour area as a fraction of the frame
    #[arg(long)]
    pub min_area: Option<f64>,
    /// Largest contour area as a fraction of the frame
    #[arg(long)]
    pub max_area: Option<f64>,
    #[arg(long)]
    pub dilate_iterations: Option<i32>,
    #[arg(long)]
    pub erode_iterations: Option<i32>,
    /// Odd Gaussian kernel size for the mask
    #[arg(long, allow_negative_numbers = true)]
    pub blur: Option<i32>,
    /// Apply the iteration counts to the edge cleanup (bare flag means true)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub honor_iterations: Option<bool>,
}

impl HeuristicArgs {
    pub fn apply_to(&self, base: HeuristicConfig) -> HeuristicConfig {
        HeuristicConfig {
            canny_low: self.canny_low.unwrap_or(base.canny_low),
            canny_high: self.canny_high.unwrap_or(base.canny_high),
            min_area: self.min_area.unwrap_or(base.min_area),
            max_area: self.max_area.unwrap_or(base.max_area),
            dilate_iterations: self.dilate_iterations.unwrap_or(base.dilate_iterations),
            erode_iterations: self.erode_iterations.unwrap_or(base.erode_iterations),
            blur: self.blur.unwrap_or(base.blur),
            honor_iterations: self.honor_iterations.unwrap_or(base.honor_iterations),
        }
    }
}
