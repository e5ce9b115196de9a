use clap::Parser;
use env_logger::Env;
use log::error;

use silhouette::cli::{Cli, Command};
use silhouette::config::{SilhouetteConfig, load_config};
use silhouette::display::HighGuiWindow;
use silhouette::pipeline::{heuristic, statistical};
use silhouette::types::{RunSummary, SubtractorType};
use silhouette::{HeuristicPipeline, Result, StatisticalPipeline, VideoSource};

fn run(cli: Cli) -> Result<RunSummary> {
    let config: SilhouetteConfig = match &cli.config {
        Some(path) => load_config(path)?,
        None => SilhouetteConfig::default(),
    };

    // configuration is checked before the source is opened
    match cli.command {
        Command::Statistical { method } => {
            let kind: SubtractorType = method.parse()?;
            let source = VideoSource::open(&cli.source)?;
            let pipeline = StatisticalPipeline::with_kind(source, kind, &config.statistical)?;
            let mut window = HighGuiWindow::new(statistical::WINDOW_NAME)?;
            pipeline.run(&mut window)
        }
        Command::Heuristic(args) => {
            let heuristic_config = args.apply_to(config.heuristic);
            heuristic_config.validate()?;
            let source = VideoSource::open(&cli.source)?;
            let pipeline = HeuristicPipeline::new(source, heuristic_config)?;
            let mut window = HighGuiWindow::new(heuristic::WINDOW_NAME)?;
            pipeline.run(&mut window)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(summary) => summary.exit_code(),
        Err(error) => {
            error!("{error}");
            error.exit_code()
        }
    };
    std::process::exit(code);
}
