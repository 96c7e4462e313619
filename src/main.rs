//! restkit binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use restkit::api::{serve_with_state, AppState};
use restkit::cli::{parse_args, print_help, print_version};
use restkit::config::Config;
use restkit::{logging, MemoryCacheClient};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'restkit --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _ = logging::init_with_filter(config.log_filter());

    info!("restkit v{}", env!("CARGO_PKG_VERSION"));

    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(Arc::new(MemoryCacheClient::new()), &config.session) {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(cookie = %config.session.cookie_name, "Session store initialized");

    match serve_with_state(server_config, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
