//! verbdrill CLI — runs the drill server and manages preset files.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verbdrill", version, about = "German verb conjugation drill server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Directory of extra preset files (overrides config)
        #[arg(long)]
        preset_dir: Option<PathBuf>,
    },

    /// Validate preset TOML files
    Validate {
        /// Path to a preset file or directory
        #[arg(long)]
        presets: PathBuf,
    },

    /// List built-in and configured presets
    ListPresets {
        /// Directory of extra preset files
        #[arg(long)]
        preset_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example preset
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "verbdrill=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            bind,
            preset_dir,
        } => commands::serve::execute(config, bind, preset_dir).await,
        Commands::Validate { presets } => commands::validate::execute(presets),
        Commands::ListPresets { preset_dir, config } => {
            commands::list_presets::execute(preset_dir, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
