mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stripcheck",
    version,
    about = "Read water test strips photographed around a QR marker"
)]
struct Cli {
    /// Log pipeline steps to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more strip photographs
    Analyze {
        /// Image file(s) to analyze
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Tab-separated rule table
        #[arg(short, long, value_name = "FILE", default_value = "Conditions.txt")]
        rules: PathBuf,

        /// JSON analysis configuration (default: built-in calibration)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show fiducial, zone and coverage details
        #[arg(long)]
        detail: bool,
    },
    /// Inspect a rule table
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Print the default analysis configuration as JSON
    Config,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List rules in match order
    Show {
        /// Path to the tab-separated rule table
        file: PathBuf,
    },
    /// Check a rule table and report skipped records
    Validate {
        /// Path to the tab-separated rule table
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Analyze {
            images,
            rules,
            config,
            output,
            detail,
        } => commands::analyze::run(images, &rules, config, &output, detail),
        Commands::Rules { action } => match action {
            RulesAction::Show { file } => commands::rules::show(&file),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
        Commands::Config => commands::config::print_default(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
