mod app;
mod config;
mod domain;
mod infrastructure;
mod practicum;
mod tasks;

use std::process;

use anyhow::Result;
use config::ConfigError;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let logging_config = config::load_logging_config();
    let paths = directories::ensure_directories(&logging_config)?;
    logging::init_tracing(&logging_config, &paths)?;

    let config = match config::load_config() {
        Ok(config) => config,
        Err(ConfigError::MissingCredentials(missing)) => {
            for name in missing {
                tracing::error!(target: "config", variable = name, "missing required environment variable");
            }
            process::exit(1);
        }
        Err(err) => {
            tracing::error!(target: "config", error = %err, "invalid configuration");
            process::exit(1);
        }
    };

    let (shutdown, _) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::HomeworkBotApp::initialize(config, shutdown)?;
    app.run().await
}
