use anchor_config::NetworkType;
use anchor_core::Decimal;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the Anchor CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "anchor-cli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Anchor CLI - receipts, tx lookups and lending calculators"
)]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "ANCHOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the configured network
    #[arg(long = "network", value_name = "NETWORK")]
    pub network: Option<NetworkType>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the receipt of a confirmed transaction from its LCD JSON
    Render {
        #[arg(value_enum)]
        operation: Operation,

        /// File holding the `GET /txs/{hash}` response
        #[arg(value_name = "FILE")]
        tx_info: PathBuf,
    },

    /// Fetch a transaction from the LCD and render its receipt
    TxInfo {
        #[arg(value_name = "HASH")]
        hash: String,

        /// Operation used to render the receipt
        #[arg(long, value_enum, default_value = "deposit")]
        operation: Operation,
    },

    /// Current market collaterals and one-day history
    Collaterals,

    /// Largest redeemable collateral for a loan
    RedeemMax {
        /// Collateral balance (micro units)
        #[arg(long)]
        balance: Decimal,

        /// Loan amount (micro UST)
        #[arg(long)]
        loan: Decimal,

        #[arg(long)]
        max_ltv: Decimal,

        #[arg(long)]
        oracle_price: Decimal,
    },

    /// bLuna received for a Luna amount, with balance checks
    MintQuote {
        /// Luna to bond (display units)
        #[arg(long)]
        amount: Decimal,

        /// Luna per bLuna; 1 when omitted
        #[arg(long)]
        exchange_rate: Option<Decimal>,

        /// Wallet uusd balance (micro units)
        #[arg(long)]
        uusd_balance: Option<Decimal>,

        /// Wallet uluna balance (micro units)
        #[arg(long)]
        uluna_balance: Option<Decimal>,
    },
}

/// Operations whose receipts can be rendered
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Mint,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}
