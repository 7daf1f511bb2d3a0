use std::process::ExitCode;

use auth_smoke::{Harness, Termination, config, observability};

#[actix::main]
async fn main() -> ExitCode {
    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    observability::init(&config.observability);
    observability::log_loaded(&config);

    let mut harness = Harness::new(config);

    let termination = tokio::select! {
        result = harness.run_all() => match result {
            Ok(_) => Termination::Completed,
            Err(e) => Termination::Errored(e),
        },
        _ = interrupted() => Termination::Interrupted,
    };

    let code = harness.finish(termination);

    ExitCode::from(code as u8)
}

/// Resolves on Ctrl-C; never resolves when the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
