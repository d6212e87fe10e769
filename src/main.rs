use clap::Parser;
use cardiorisk::cli::Cli;
use tracing::error;

mod main_runtime;

use main_runtime::{init_logging, init_logging_simple};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging_simple();
            error!("{e:#}");
            return Err(e);
        }
    };

    init_logging(&config.logging, !cli.is_interactive());

    cli.run(config).await
}
