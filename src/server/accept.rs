// Accept loop module
// Accepts connections until the process is killed

use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop.
///
/// Runs until process termination; there is no shutdown path. A failed
/// accept is logged and the loop continues, so no single connection or
/// request failure stops the server.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
