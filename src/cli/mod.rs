//! Cardiorisk CLI
//!
//! Commands:
//! - `cardiorisk form`    - Interactive patient form (default)
//! - `cardiorisk predict` - Assess one record given as flags
//! - `cardiorisk schema`  - Show the input column schema
//! - `cardiorisk info`    - Show model information
//! - `cardiorisk serve`   - Serve the form over HTTP
//! - `cardiorisk config`  - Show the effective configuration

pub mod output;
pub mod predict;
pub mod schema;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::controller::InferenceController;
use crate::ml::{ModelCache, ModelFormat};
use crate::services::{HttpServer, HttpState};
use crate::tui::{self, FormApp};

/// Heart disease risk assessment
#[derive(Parser, Debug)]
#[command(name = "cardiorisk")]
#[command(author, version, about = "Heart disease risk prediction form")]
pub struct Cli {
    /// Configuration directory
    #[arg(long, global = true, env = "CARDIO_CONFIG_DIR", default_value = "config")]
    pub config: PathBuf,

    /// Model artifact path (overrides model.path)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Model format: auto, dense or onnx (overrides model.format)
    #[arg(long, global = true)]
    pub format: Option<ModelFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive patient form
    Form,

    /// Assess one record given as flags
    Predict(predict::PredictArgs),

    /// Show the input column schema
    Schema {
        #[arg(long)]
        json: bool,
    },

    /// Show model information
    Info {
        #[arg(long)]
        json: bool,
    },

    /// Serve the form over HTTP
    Serve {
        /// Bind host (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the effective configuration as TOML
    Config,
}

impl Cli {
    /// Whether the command owns the terminal screen.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Form))
    }

    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_from(&self.config).with_context(|| {
            format!("failed to load configuration from {}", self.config.display())
        })?;

        if let Some(path) = &self.model {
            config.model.path = Some(path.clone());
        }
        if let Some(format) = self.format {
            config.model.format = format;
        }
        if let Some(Commands::Serve { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        config
            .validate()
            .map_err(|errors| anyhow::anyhow!("invalid configuration: {}", errors.join("; ")))?;
        Ok(config)
    }

    pub async fn run(self, config: AppConfig) -> Result<()> {
        let controller = || {
            let cache = ModelCache::global(config.model.path.clone(), config.model.format);
            InferenceController::from_cache(cache)
        };

        match self.command {
            None | Some(Commands::Form) => {
                tui::run_form(FormApp::new(controller())).context("terminal form failed")
            }
            Some(Commands::Predict(args)) => predict::run(&args, &controller()),
            Some(Commands::Schema { json }) => schema::run_schema(json),
            Some(Commands::Info { json }) => schema::run_info(&controller(), json),
            Some(Commands::Config) => {
                let rendered =
                    toml::to_string_pretty(&config).context("failed to render configuration")?;
                print!("{rendered}");
                Ok(())
            }
            Some(Commands::Serve { .. }) => {
                let controller = controller();
                let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
                    .parse()
                    .with_context(|| {
                        format!(
                            "invalid bind address {}:{}",
                            config.server.host, config.server.port
                        )
                    })?;
                info!(%addr, model_loaded = controller.model().is_some(), "serving form");
                let server = HttpServer::new(Arc::new(HttpState::new(controller)), addr);
                server.run().await.context("HTTP server failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_form() {
        let cli = Cli::parse_from(["cardiorisk"]);
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn global_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "cardiorisk",
            "--config",
            dir.path().to_str().unwrap(),
            "serve",
            "--port",
            "9000",
            "--model",
            "/tmp/heart.onnx",
            "--format",
            "onnx",
        ]);
        assert!(!cli.is_interactive());

        let config = cli.load_config().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.model.path, Some(PathBuf::from("/tmp/heart.onnx")));
        assert_eq!(config.model.format, ModelFormat::Onnx);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "cardiorisk",
            "--config",
            dir.path().to_str().unwrap(),
            "serve",
            "--port",
            "0",
        ]);
        let err = cli.load_config().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn bad_format_is_a_parse_error() {
        assert!(Cli::try_parse_from(["cardiorisk", "--format", "pickle", "info"]).is_err());
    }
}
