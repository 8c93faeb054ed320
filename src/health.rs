use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

pub fn router() -> Router {
    Router::new().route("/healthz", get(health_check))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Bind `addr` and serve the health endpoint until the process exits.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind health server to {}", addr))?;
    serve_listener(listener).await
}

pub async fn serve_listener(listener: TcpListener) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Health server listening on http://{}/healthz", addr);
    }
    axum::serve(listener, router())
        .await
        .context("Health server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_listener(listener));
        addr
    }

    #[tokio::test]
    async fn test_healthz_returns_ok() {
        let addr = spawn_server().await;

        let resp = reqwest::get(format!("http://{}/healthz", addr))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let addr = spawn_server().await;

        let resp = reqwest::get(format!("http://{}/nope", addr)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
