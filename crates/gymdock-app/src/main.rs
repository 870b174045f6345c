use clap::Parser;

use gymdock_infrastructure::config::KioskConfig;
use gymdock_lib::presentation::cli::{self, Cli};
use gymdock_lib::presentation::error::CommandError;
use gymdock_lib::presentation::state::AppState;

fn report(error: &CommandError, json: bool) -> i32 {
    if json {
        match serde_json::to_string(error) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("{}", error),
        }
    } else {
        eprintln!("Error: {}", error);
    }
    error.exit_code()
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    let json = args.json;

    let config_path = args.config.clone().unwrap_or_else(KioskConfig::default_path);
    let config = match KioskConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => std::process::exit(report(&CommandError::from(e), json)),
    };

    match gymdock_infrastructure::logging::init_logger(&config.logging) {
        Ok(_) => {
            tracing::info!("gymdock starting config={}", config_path.display());
            tracing::info!("File logging initialized at: {}", config.logging.log_dir().display());
        }
        Err(e) => {
            eprintln!("Failed to initialize file logging: {}", e);
            eprintln!("Falling back to console logging only");

            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .with_target(true)
                .try_init();
        }
    }

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize app state: {}", e);
            std::process::exit(report(&e, json));
        }
    };

    if let Err(e) = cli::run(&state, args.command, json).await {
        tracing::warn!("Command failed: {}", e);
        std::process::exit(report(&e, json));
    }
}
