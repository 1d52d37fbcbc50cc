use std::process::ExitCode;

use tracing::{error, info};
use venue_content::http::{self, AppState, Settings};
use venue_content::{logging, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("venue-content: {}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging, config.server.environment);

    if config.security.api_key.is_none() {
        if config.server.environment.is_development() {
            info!("no API key configured; privileged routes are open in development");
        } else {
            error!("no API key configured; privileged routes will answer 500");
        }
    }

    let settings = Settings::new(config.server.environment, config.security.api_key.clone());
    let state = match AppState::open(&config.storage.data_dir, settings) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, data_dir = %config.storage.data_dir.display(), "cannot open collections");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = http::serve(state, &config.server.bind_address()).await {
        error!(error = %err, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
