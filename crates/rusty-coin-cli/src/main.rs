// Rust guideline compliant 2026-10-19

//! Rusty Coin CLI Application
//!
//! Command-line interface for a local Rusty Coin chain.

use clap::Parser;
use rust_decimal::Decimal;
use rusty_coin_cli::{commands, create_formatter, should_use_color, OutputFormatter};
use rusty_coin_core::{DataDir, HashValue};
use rusty_coin_node::{init_tracing, TracingOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "rscn",
    version,
    about = "Rusty Coin: a small proof-of-work UTXO ledger",
    long_about = "Rusty Coin keeps a proof-of-work chain of signed UTXO transactions in a local .rscn directory and can serve it to peers over HTTP.",
    after_help = "Examples:\n  rscn init\n  rscn wallet address\n  rscn mine\n  rscn send 3f2a...9c 12.5 --fee 0.1\n  rscn chain --limit 10\n  rscn verify\n  rscn node --listen 127.0.0.1:8333\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Directory holding .rscn (defaults to the current directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RSCN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format on stderr (a log file is always JSON)
    #[arg(long, value_enum, global = true, env = "RSCN_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a data directory with a genesis block and a wallet
    Init {
        /// Message stored in the genesis block
        #[arg(long)]
        genesis_message: Option<String>,
    },

    /// Manage the local wallet
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },

    /// Pay coins from the local wallet
    Send {
        /// Receiving address (64 hex characters)
        to: HashValue,

        /// Amount to pay
        amount: Decimal,

        /// Fee left for the miner
        #[arg(long, default_value = "0")]
        fee: Decimal,
    },

    /// Mine one block from pending transactions
    Mine {
        /// Address credited with the reward
        #[arg(long)]
        to: Option<HashValue>,

        /// Most pending transactions to include
        #[arg(long, default_value_t = 100)]
        max_txs: usize,
    },

    /// Show a block
    Show {
        /// Block index
        index: usize,
    },

    /// List blocks
    Chain {
        /// Only list the newest blocks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate every stored block
    Verify,

    /// Show chain and wallet status
    Status,

    /// Serve the chain over HTTP
    Node {
        /// Address to bind
        #[arg(long)]
        listen: Option<String>,

        /// Root node to announce to
        #[arg(long)]
        root: Option<String>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum WalletAction {
    /// Create a new wallet key
    New {
        /// Replace an existing wallet
        #[arg(long)]
        force: bool,
    },

    /// Print the wallet address
    Address,

    /// Show the balance of the wallet or another address
    Balance {
        /// Address to inspect instead of the local wallet
        #[arg(long)]
        of: Option<HashValue>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let use_color = !cli.no_color && should_use_color();
    let format = match cli.format {
        Some(OutputFormat::Json) => "json",
        Some(OutputFormat::Table) => "table",
        Some(OutputFormat::Plain) => "plain",
        None => {
            if cli.json {
                "json"
            } else {
                "table"
            }
        }
    };
    let formatter = create_formatter(format, use_color);

    // Nodes log at the configured level; one-shot commands stay quiet.
    let log_level = match (&cli.log_level, &cli.command) {
        (Some(level), _) => level.clone(),
        (None, Commands::Node { .. }) => DataDir::discover(cli.data_dir.as_deref())
            .and_then(|data_dir| data_dir.load_config())
            .map(|config| config.log_level)
            .unwrap_or_else(|_| "info".to_string()),
        (None, _) => "warn".to_string(),
    };
    let tracing_options = TracingOptions {
        log_level,
        log_file: cli.log_file.clone(),
        json: matches!(cli.log_format, LogFormat::Json),
    };
    let _guard = match init_tracing(&tracing_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    match run(cli, formatter.as_ref(), use_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", formatter.format_error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, formatter: &dyn OutputFormatter, use_color: bool) -> anyhow::Result<()> {
    let root = cli.data_dir;
    let data_dir = || DataDir::discover(root.as_deref());

    match cli.command {
        Commands::Init { genesis_message } => {
            let root = match &root {
                Some(root) => root.clone(),
                None => std::env::current_dir()?,
            };
            commands::init::execute(&root, genesis_message)?;
        }
        Commands::Wallet { action } => match action {
            WalletAction::New { force } => {
                commands::wallet::create(&data_dir()?, force)?;
            }
            WalletAction::Address => {
                commands::wallet::address(&data_dir()?)?;
            }
            WalletAction::Balance { of } => {
                commands::wallet::balance(&data_dir()?, of, formatter)?;
            }
        },
        Commands::Send { to, amount, fee } => {
            commands::send::execute(&data_dir()?, to, amount, fee, formatter)?;
        }
        Commands::Mine { to, max_txs } => {
            commands::mine::execute(&data_dir()?, to, max_txs, formatter)?;
        }
        Commands::Show { index } => {
            commands::show::execute(&data_dir()?, index, formatter)?;
        }
        Commands::Chain { limit } => {
            commands::chain::execute(&data_dir()?, limit, formatter)?;
        }
        Commands::Verify => {
            commands::verify::execute(&data_dir()?, use_color)?;
        }
        Commands::Status => {
            commands::status::execute(&data_dir()?, formatter)?;
        }
        Commands::Node { listen, root: peer } => {
            commands::node::execute(root.clone(), listen, peer)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["rscn", "--log-format", "json", "status"]).unwrap();
        assert!(matches!(cli.log_format, LogFormat::Json));

        let cli = Cli::try_parse_from(["rscn", "status"]).unwrap();
        assert!(matches!(cli.log_format, LogFormat::Text));
    }
}
