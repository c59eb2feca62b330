//! Timetable CLI.
//!
//! Reads events, deadlines, and periodics and prints a filled timetable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use u_timetable::config::{DEFAULT_DISPLAY_SLOTS, DEFAULT_MAX_POWER, DEFAULT_REPOPULATE_THRESHOLD};
use u_timetable::models::PeriodicPolicy;
use u_timetable::render::render;
use u_timetable::{GeneratorConfig, InputData, TimetableGenerator};

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Fit deadlines, events and periodic activities into half-hour slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable.
    Generate {
        /// The input's filename (JSON)
        #[arg(short, long, default_value = "input.json", conflicts_with = "dir")]
        file: PathBuf,
        /// Merge every .at.toml file under this directory instead
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// The number of slots to display
        #[arg(short, long, default_value_t = DEFAULT_DISPLAY_SLOTS)]
        slots: usize,
        /// Repopulation threshold
        #[arg(short, long, default_value_t = DEFAULT_REPOPULATE_THRESHOLD)]
        repopulate: f64,
        /// Give up allocation after this weighting exponent
        #[arg(long, default_value_t = DEFAULT_MAX_POWER)]
        max_power: u32,
        /// Keep deadline work out of slots tagged with a periodic
        #[arg(long)]
        reserve_periodics: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            file,
            dir,
            slots,
            repopulate,
            max_power,
            reserve_periodics,
        } => {
            let policy = if reserve_periodics {
                PeriodicPolicy::Reserve
            } else {
                PeriodicPolicy::Advisory
            };
            let config = GeneratorConfig::default()
                .with_display_slots(slots)
                .with_repopulate_threshold(repopulate)
                .with_max_power(max_power)
                .with_periodic_policy(policy);

            let input = match &dir {
                Some(dir) => InputData::load_tree(dir)
                    .with_context(|| format!("error opening input tree {}", dir.display()))?,
                None => InputData::load_json(&file)
                    .with_context(|| format!("error opening file {}", file.display()))?,
            };
            let input = input.prepare(config.anchor)?;

            let timetable = TimetableGenerator::new(config).generate(input)?;
            print!("{}", render(&timetable, slots, &Local));
        }
    }

    Ok(())
}
