//! Hurler Language Server Binary Entry Point
//!
//! This binary provides a Language Server Protocol implementation for .hurl files.
//! It uses tower-lsp for the LSP framework and tokio for async runtime.
//!
//! # Communication
//!
//! The LSP server communicates via stdin/stdout using the JSON-RPC protocol.
//! Logging goes to stderr through env_logger (`RUST_LOG` overrides the
//! default `info` filter) so it never interferes with the protocol.

use hurler::lsp_server::backend::Backend;
use tower_lsp::{LspService, Server};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Hurler Language Server v{}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| {
        log::debug!("Initializing backend with client connection");
        Backend::new(client)
    });

    log::info!("Server ready, listening on stdin/stdout");

    let server = Server::new(stdin, stdout, socket);

    tokio::select! {
        _ = server.serve(service) => {
            log::info!("Server finished");
        }
        _ = shutdown_signal() => {
            log::info!("Received shutdown signal");
        }
    }

    log::info!("Server shutting down gracefully");
}

/// Wait for a shutdown signal (SIGINT/SIGTERM on Unix, Ctrl+C on Windows)
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = sigint.recv() => {
                log::info!("Received SIGINT");
            }
            _ = sigterm.recv() => {
                log::info!("Received SIGTERM");
            }
        }
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        log::info!("Received Ctrl+C");
    }
}
