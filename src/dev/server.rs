//! Static file server for the dev output directory.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::error::{ElementError, Result};

/// Serve files from `dist`; directories resolve to their `index.html`.
pub fn router(dist: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(dist))
}

/// Bind the dev server on localhost. Port 0 picks a free port.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    TcpListener::bind(addr).await.map_err(|e| ElementError::Server {
        message: format!("Cannot listen on localhost:{}: {}", port, e),
        help: Some("Pick another port with `element start --port <PORT>` or `port` in element.config.yaml".to_string()),
    })
}

/// Serve `dist` until the process ends.
pub async fn serve(listener: TcpListener, dist: PathBuf) -> Result<()> {
    axum::serve(listener, router(&dist))
        .await
        .map_err(|e| ElementError::Server {
            message: e.to_string(),
            help: None,
        })
}
