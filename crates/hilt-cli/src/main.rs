//! Hiltsmith CLI - Command-line interface for the configurator engine

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{assemble, config, inspect, layout, material, variants, TableArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hilt")]
#[command(about = "Assemble, inspect and configure modular hilt props", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Dimension table merged over the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory scanned for *.part.toml sidecars
    #[arg(long, global = true)]
    parts_dir: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stacked slot positions for the current configuration
    Layout {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Resolve the render material for a color and finish
    Material {
        /// Hex color, e.g. "#2c3f83"
        color: String,

        /// Finish (metal or matte)
        #[arg(long, default_value = "metal")]
        finish: String,

        /// Resolve as a blade
        #[arg(long)]
        blade: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Configuration operations
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Import a glTF/GLB part and show how it normalizes
    Inspect {
        /// Path to the model file
        path: PathBuf,

        /// Part category (pommel, ring, body, emitter, blade)
        #[arg(long)]
        category: String,

        /// Asset id to look up in the dimension table (defaults to the path)
        #[arg(long)]
        asset: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run one full resolution pass against assets on disk
    Assemble {
        /// Root directory asset ids are resolved against
        #[arg(long, default_value = ".")]
        assets_dir: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List catalogued variants
    Variants {
        /// Only this category
        category: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let table_args = TableArgs {
        catalog: cli.catalog,
        parts_dir: cli.parts_dir,
    };
    let config_path = cli.config;

    match cli.command {
        Commands::Layout { format } => layout::run(&table_args, config_path, &format),
        Commands::Material {
            color,
            finish,
            blade,
            format,
        } => material::run(&color, &finish, blade, &format),
        Commands::Config(cmd) => config::run(cmd, config_path),
        Commands::Inspect {
            path,
            category,
            asset,
            format,
        } => inspect::run(inspect::InspectArgs {
            path,
            category,
            asset,
            format,
            table: table_args,
        }),
        Commands::Assemble { assets_dir, format } => {
            assemble::run(&table_args, config_path, &assets_dir, &format)
        }
        Commands::Variants { category } => variants::run(&table_args, category.as_deref()),
    }
}
