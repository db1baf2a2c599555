//! Cheikhei Server - HTTP API for Meitei Mayek sentence segmentation

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;
mod state;

use cheikhei_core::{LoadReport, ModelSlot, SplitterConfig};
use state::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "cheikhei-server",
    about = "HTTP API server for Meitei Mayek sentence segmentation",
    version = env!("CARGO_PKG_VERSION")
)]
struct ServerArgs {
    /// Path to the trained model directory
    #[arg(short, long, default_value = "./output/model-best")]
    model: PathBuf,

    /// Path to the SentencePiece .model file
    #[arg(short = 's', long, default_value = "meitei_tokenizer.model")]
    tokenizer: PathBuf,

    /// Override the boundary probability threshold
    #[arg(long)]
    threshold: Option<f32>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BindConfig {
    host: String,
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cheikhei_server=info,cheikhei_core=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cheikhei Server");

    let config = SplitterConfig::builder()
        .model_dir(&args.model)
        .tokenizer_path(&args.tokenizer);
    let config = match args.threshold {
        Some(threshold) => config.threshold(threshold),
        None => config,
    }
    .build()?;

    // Load the artifacts before accepting traffic. A failed load keeps the
    // server up; segmentation requests then answer 503 until a restart with
    // valid artifacts.
    let slot = Arc::new(ModelSlot::new());
    let load_slot = Arc::clone(&slot);
    let report = tokio::task::spawn_blocking(move || load_slot.load(&config)).await?;
    if let LoadReport::Failed(reason) = &report {
        warn!(%reason, "model not loaded; serving health and 503s only");
    }

    let state = AppState::new(slot);
    let app = api::create_router(state);

    let bind = resolve_bind_config(&args);
    let addr = format!("{}:{}", bind.host, bind.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn resolve_bind_config(args: &ServerArgs) -> BindConfig {
    BindConfig {
        host: args.host.clone().unwrap_or_else(host_from_env_or_default),
        port: args.port.unwrap_or_else(port_from_env_or_default),
    }
}

fn host_from_env_or_default() -> String {
    match std::env::var("CHEIKHEI_HOST") {
        Ok(raw) => {
            let host = raw.trim();
            if host.is_empty() {
                warn!("Empty CHEIKHEI_HOST, falling back to 0.0.0.0");
                "0.0.0.0".to_string()
            } else {
                host.to_string()
            }
        }
        Err(_) => "0.0.0.0".to_string(),
    }
}

fn port_from_env_or_default() -> u16 {
    match std::env::var("CHEIKHEI_PORT") {
        Ok(raw) => match raw.trim().parse::<u16>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid CHEIKHEI_PORT='{}', falling back to 8000", raw);
                8000
            }
        },
        Err(_) => 8000,
    }
}

/// Wait for ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .expect("environment lock poisoned")
    }

    fn clear_bind_env() {
        std::env::remove_var("CHEIKHEI_HOST");
        std::env::remove_var("CHEIKHEI_PORT");
    }

    fn parse(args: &[&str]) -> ServerArgs {
        ServerArgs::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn cli_values_override_environment() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("CHEIKHEI_HOST", "0.0.0.0");
        std::env::set_var("CHEIKHEI_PORT", "8000");

        let bind = resolve_bind_config(&parse(&[
            "cheikhei-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ]));

        assert_eq!(bind.host, "127.0.0.1");
        assert_eq!(bind.port, 9000);
        clear_bind_env();
    }

    #[test]
    fn uses_environment_when_cli_values_missing() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("CHEIKHEI_HOST", "127.0.0.1");
        std::env::set_var("CHEIKHEI_PORT", "8088");

        let bind = resolve_bind_config(&parse(&["cheikhei-server"]));

        assert_eq!(bind.host, "127.0.0.1");
        assert_eq!(bind.port, 8088);
        clear_bind_env();
    }

    #[test]
    fn falls_back_to_defaults_without_cli_or_environment() {
        let _guard = env_lock();
        clear_bind_env();

        let bind = resolve_bind_config(&parse(&["cheikhei-server"]));

        assert_eq!(bind.host, "0.0.0.0");
        assert_eq!(bind.port, 8000);
    }

    #[test]
    fn falls_back_to_default_when_env_port_is_invalid() {
        let _guard = env_lock();
        clear_bind_env();
        std::env::set_var("CHEIKHEI_PORT", "not-a-port");

        let bind = resolve_bind_config(&parse(&["cheikhei-server"]));

        assert_eq!(bind.port, 8000);
        clear_bind_env();
    }

    #[test]
    fn artifact_paths_default_to_training_layout() {
        let args = parse(&["cheikhei-server"]);
        assert_eq!(args.model, PathBuf::from("./output/model-best"));
        assert_eq!(args.tokenizer, PathBuf::from("meitei_tokenizer.model"));
    }
}
