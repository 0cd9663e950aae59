//! Liveness endpoint for uptime checks. Requires the `server` feature (enabled by default).

use std::{io, net::SocketAddr};

use axum::{routing::get, Router};
use tokio::net::TcpListener;

/// Body returned by the liveness route
pub const ALIVE: &str = "Bot is alive";

/// Builds the router: `GET /` answers with [`ALIVE`].
pub fn router() -> Router {
	Router::new().route("/", get(alive))
}

/// Binds to the given address and serves [`router()`] until the task is dropped or an I/O error occurs.
///
/// # Errors
/// If the address can't be bound or the server fails while accepting connections, the I/O error is returned.
pub async fn serve(addr: SocketAddr) -> io::Result<()> {
	let listener = TcpListener::bind(addr).await?;
	tracing::info!(addr = %listener.local_addr()?, "liveness server listening");
	axum::serve(listener, router()).await
}

/// Liveness route
async fn alive() -> &'static str {
	ALIVE
}
