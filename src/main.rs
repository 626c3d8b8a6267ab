//! Global Fee CLI Application
//!
//! A command-line interface for inspecting and testing the fee admission policy.

use clap::{Parser, Subcommand};
use globalfee::admission::PipelineStage;
use globalfee::cli::{self, AppState};
use globalfee::config::DEFAULT_DATA_DIR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "globalfee")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "Minimum fee admission control for blockchain transactions", long_about = None)]
struct Cli {
    /// Data directory holding the node fee config
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new fee config
    Init {
        /// Local minimum gas prices, e.g. "0.0025uatom,0.001stake"
        #[arg(short, long)]
        min_gas_prices: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the node fee config
    Config,

    /// Check whether a transaction would be admitted
    Check {
        /// Transaction JSON file
        #[arg(short, long)]
        tx: PathBuf,

        /// Governance params JSON file (no network floor if omitted)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Pipeline stage: speculative, final or simulation
        #[arg(short, long, default_value = "speculative")]
        stage: PipelineStage,
    },

    /// Show the effective minimum gas prices
    Effective {
        /// Governance params JSON file (no network floor if omitted)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Also print the fees required for this gas limit
        #[arg(short, long)]
        gas_limit: Option<u64>,
    },

    /// Governance params operations
    Params {
        #[command(subcommand)]
        action: ParamsCommands,
    },
}

#[derive(Subcommand)]
enum ParamsCommands {
    /// Validate a params file
    Validate {
        /// Params JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Commands that don't need the loaded config
    match &cli.command {
        Commands::Init {
            min_gas_prices,
            force,
        } => return cli::cmd_init(&cli.data_dir, min_gas_prices.as_deref(), *force),
        Commands::Params {
            action: ParamsCommands::Validate { file },
        } => return cli::cmd_params_validate(file),
        _ => {}
    }

    let state = AppState::new(&cli.data_dir)?;

    match cli.command {
        Commands::Init { .. } | Commands::Params { .. } => unreachable!(),

        Commands::Config => {
            cli::cmd_config_show(&state)?;
        }

        Commands::Check { tx, params, stage } => {
            let accepted = cli::cmd_check(&state, &tx, params.as_deref(), stage)?;
            if !accepted {
                std::process::exit(1);
            }
        }

        Commands::Effective { params, gas_limit } => {
            cli::cmd_effective(&state, params.as_deref(), gas_limit)?;
        }
    }

    Ok(())
}
