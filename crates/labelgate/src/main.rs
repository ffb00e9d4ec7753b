use clap::Parser;
use labelgate_core::Verbosity;
use labelgate_filter::FilterEngine;
use labelgate_server::{AppState, Config, ExtenderServer};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "labelgate", about = "Kubernetes scheduler extender admitting nodes labelled extender=true")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "LABELGATE_BIND", default_value = "0.0.0.0:8080")]
    bind: String,

    /// Log verbosity; 4 traces responses, 5 dumps full requests
    #[arg(short = 'v', long, env = "LABELGATE_VERBOSITY", default_value_t = 0)]
    verbosity: u8,

    /// Reject filter requests with larger bodies (unlimited when unset)
    #[arg(long, env = "LABELGATE_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut state = AppState::new(FilterEngine::default(), Verbosity::new(cli.verbosity));
    if let Some(limit) = cli.max_body_bytes {
        state = state.with_max_body_bytes(limit);
    }

    run_serve(&cli.bind, state).await
}

/// Run the extender until ctrl-c or until the server fails
async fn run_serve(bind: &str, state: AppState) -> miette::Result<()> {
    info!("Starting server");

    let listen_addr: SocketAddr = bind
        .parse()
        .map_err(|e| miette::miette!("Invalid bind address '{}': {}", bind, e))?;

    // Bind up front so a taken port fails the process instead of a task
    let listener = TcpListener::bind(listen_addr)
        .await
        .map_err(|e| miette::miette!("Failed to bind {}: {}", listen_addr, e))?;

    let server = ExtenderServer::new(Config { listen_addr }, Arc::new(state));

    let token = CancellationToken::new();
    let server_token = token.clone();
    let server_handle =
        tokio::spawn(async move { server.serve_until(listener, server_token).await });

    run_until_shutdown(server_handle, token, tokio::signal::ctrl_c()).await
}

/// Wait for `shutdown` or for the server task to end, whichever is first.
///
/// A server that stops on its own is an error for the process.
async fn run_until_shutdown<F>(
    mut server_handle: JoinHandle<std::io::Result<()>>,
    token: CancellationToken,
    shutdown: F,
) -> miette::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        result = &mut server_handle => {
            return match result {
                Ok(Ok(())) => Err(miette::miette!("Server stopped unexpectedly")),
                Ok(Err(e)) => Err(miette::miette!("Server error: {}", e)),
                Err(e) => Err(miette::miette!("Server task failed: {}", e)),
            };
        }
        signal = shutdown => {
            signal.map_err(|e| miette::miette!("Failed to listen for ctrl-c: {}", e))?;
        }
    }

    info!("Shutting down gracefully...");
    token.cancel();

    let shutdown_timeout = std::time::Duration::from_secs(5);
    match tokio::time::timeout(shutdown_timeout, server_handle).await {
        Ok(Ok(Err(e))) => error!("Server error during shutdown: {}", e),
        Ok(Err(e)) => error!("Server task failed during shutdown: {}", e),
        Err(_) => error!("Server did not drain within {:?}", shutdown_timeout),
        Ok(Ok(Ok(()))) => {}
    }

    info!("Shutdown complete");

    Ok(())
}
