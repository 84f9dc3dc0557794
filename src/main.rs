use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use squad_search::catalog::load_pools;
use squad_search::config::{default_config_template, Config};
use squad_search::pipeline::{prune_pools, select};
use squad_search::search::Execution;

#[derive(Parser)]
#[command(name = "squad-search")]
#[command(about = "Exhaustive fantasy football squad selection under budget and team caps")]
struct Args {
    /// Directory holding the goalkeepers, defenders, midfielders and forwards files
    #[arg(long, short, default_value = ".")]
    data_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Worker threads, overriding the configuration
    #[arg(long, short)]
    workers: Option<usize>,

    /// Evaluate every batch on the main thread
    #[arg(long)]
    sequential: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    generate_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", default_config_template());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
        config.validate()?;
    }

    let pools = load_pools(&args.data_dir).context("failed to load player rosters")?;
    let pools = prune_pools(pools, &config);

    let execution = if args.sequential {
        Execution::Sequential
    } else {
        Execution::Parallel { workers: config.workers }
    };
    let outcome = select(&pools, &config, execution)?;
    info!("Scored {} squads over {} rounds", outcome.evaluated, outcome.rounds);

    match outcome.best {
        Some(squad) => print!("==============\nFinal best squad. {}", squad),
        None => println!("No squad satisfies the constraints"),
    }
    Ok(())
}
