use anchor_cli::args::CliArgs;
use anchor_cli::{commands, logging};
use anyhow::Result;
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = commands::load_config(&args)?;
    logging::init_tracing(&config.logging);

    match commands::execute(&args.command, &config).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "command failed");
            Err(e)
        }
    }
}
