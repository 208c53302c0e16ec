//! Command handlers. Each returns the text printed on stdout.

pub mod basset;
pub mod borrow;
pub mod collaterals;
pub mod render;

use crate::args::{CliArgs, Command};
use anchor_config::{AnchorConfig, ContractAddresses};
use anyhow::{Context, Result};
use tracing::debug;

/// Configuration from `--config` (or defaults), with `--network` and log
/// flags applied on top.
pub fn load_config(args: &CliArgs) -> Result<AnchorConfig> {
    let mut config = match &args.config {
        Some(path) => AnchorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnchorConfig::for_network(args.network.unwrap_or_default()),
    };

    if let Some(network) = args.network {
        if network != config.network.network_type {
            config.network.network_type = network;
            config.contracts = ContractAddresses::for_network(network);
        }
    }
    if let Some(level) = &args.log_level {
        config.logging.level = Some(level.clone());
    }
    if let Some(format) = args.log_format {
        config.logging.format = Some(format.as_str().to_string());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

pub async fn execute(command: &Command, config: &AnchorConfig) -> Result<String> {
    debug!(?command, network = %config.network.network_type, "executing command");
    match command {
        Command::Render { operation, tx_info } => {
            let info = render::load_tx_info(tx_info)?;
            let rendering = render::render_tx_info(*operation, &info, config);
            Ok(render::format_rendering(&rendering))
        }
        Command::TxInfo { hash, operation } => {
            render::fetch_and_render(hash, *operation, config).await
        }
        Command::Collaterals => collaterals::show_collaterals(config).await,
        Command::RedeemMax {
            balance,
            loan,
            max_ltv,
            oracle_price,
        } => Ok(borrow::redeem_max(balance, loan, max_ltv, oracle_price)),
        Command::MintQuote {
            amount,
            exchange_rate,
            uusd_balance,
            uluna_balance,
        } => basset::mint_quote(
            amount,
            exchange_rate.as_ref(),
            uusd_balance.as_ref(),
            uluna_balance.as_ref(),
            config,
        ),
    }
}
