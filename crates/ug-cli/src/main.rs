//! undermine: command-line driver for the underground mine simulation
//!
//! Generates seeded mines, renders them as ASCII, digs them out
//! automatically, and reads/writes the JSON save format.

mod play;
mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ug_core::config::ConfigError;
use ug_core::mine::save::{from_json, to_json_pretty};
use ug_core::{GameRng, HookError, Mine, MineProperties, SaveError, SessionStats, StaticMineConfig};

const DEFAULT_CATALOG: &str = include_str!("../assets/default_catalog.json");

/// Underground mine simulator
#[derive(Parser, Debug)]
#[command(name = "undermine")]
#[command(author, version, about = "Dig for buried treasure", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a mine and print it
    Generate {
        #[command(flatten)]
        mine: MineArgs,

        /// Show where rewards are buried
        #[arg(long)]
        reveal: bool,

        /// Write the mine as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Dig out every reward and complete the layer
    Play {
        #[command(flatten)]
        mine: MineArgs,

        /// Continue a saved mine instead of generating one
        #[arg(long)]
        load: Option<PathBuf>,

        /// Write the finished mine as JSON
        #[arg(long)]
        save: Option<PathBuf>,

        /// Items granted per collected reward
        #[arg(long, default_value_t = 1)]
        amount: u32,
    },
    /// Print a saved mine
    Show {
        path: PathBuf,

        #[arg(long)]
        reveal: bool,
    },
}

#[derive(Args, Debug)]
struct MineArgs {
    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 25)]
    width: u32,

    #[arg(long, default_value_t = 12)]
    height: u32,

    #[arg(long)]
    min_depth: Option<u32>,

    #[arg(long)]
    extra_layers: Option<u32>,

    #[arg(long, default_value_t = 3)]
    items: u32,

    #[arg(long, default_value_t = 2)]
    extra_items: u32,

    /// Seconds until the mine is discovered
    #[arg(long, default_value_t = 0.0)]
    discover_time: f64,

    /// Item catalog JSON (built-in catalog if omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

impl MineArgs {
    fn properties(&self) -> MineProperties {
        MineProperties {
            minimum_depth: self.min_depth,
            maximum_extra_layers: self.extra_layers,
            ..MineProperties::new(self.width, self.height)
                .with_items(self.items, self.extra_items)
                .with_time_to_discover(self.discover_time)
        }
    }

    fn catalog(&self) -> Result<StaticMineConfig, CliError> {
        let json = match &self.catalog {
            Some(path) => read(path)?,
            None => DEFAULT_CATALOG.to_string(),
        };
        Ok(StaticMineConfig::from_json(&json)?)
    }

    fn generate(&self) -> Result<Mine, CliError> {
        let catalog = self.catalog()?;
        let mut rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut mine = Mine::new(self.properties());
        mine.generate(&catalog, &mut rng);
        info!(
            seed = rng.seed(),
            mine_type = %catalog.mine_type,
            buried = mine.items_buried(),
            "generated mine"
        );
        Ok(mine)
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_save(mine: &Mine, path: &Path) -> Result<(), CliError> {
    fs::write(path, to_json_pretty(mine)?).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "mine saved");
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate { mine, reveal, save } => {
            let mine = mine.generate()?;
            print!("{}", render::render(&mine, reveal));
            println!("{}", render::summary(&mine));
            if let Some(path) = save {
                write_save(&mine, &path)?;
            }
        }
        Command::Play {
            mine,
            load,
            save,
            amount,
        } => {
            let mut mine = match load {
                Some(path) => from_json(&read(&path)?)?,
                None => mine.generate()?,
            };
            let mut stats = SessionStats::new(amount);
            let report = play::auto_dig(&mut mine, &mut stats)?;

            print!("{}", render::render(&mine, false));
            println!("{}", render::summary(&mine));
            println!(
                "broken={} collected={} items={} completed={}",
                report.tiles_broken,
                report.found.len(),
                stats.items_found,
                report.completed
            );
            if let Some(path) = save {
                write_save(&mine, &path)?;
            }
        }
        Command::Show { path, reveal } => {
            let mine = from_json(&read(&path)?)?;
            print!("{}", render::render(&mine, reveal));
            println!("{}", render::summary(&mine));
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "undermine failed");
            ExitCode::FAILURE
        }
    }
}
