// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The coordinator's own REST control plane (spec.md §4.7, §6): an
//! axum router over self-signed TLS, serving the public (secret-gated) and
//! internal (`10.0.0.0/8`-gated) endpoint groups from a single listener —
//! the original coordinator likewise answers both request classes on one
//! `BaseHTTPServer` socket and tells them apart by path + auth check rather
//! than by separate ports.

mod auth;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use rcgen::generate_simple_self_signed;
use tower_http::trace::TraceLayer;

use crate::orchestrator::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub secret: Arc<str>,
}

#[derive(Debug, thiserror::Error)]
pub enum ControlPlaneError {
    #[error("failed to generate self-signed certificate: {0}")]
    Certificate(#[from] rcgen::Error),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(routes::liveness))
        .route("/hadoop/launch", post(routes::launch))
        .route("/hadoop/add_slaves", post(routes::add_slaves))
        .route("/hadoop/teardown", post(routes::teardown))
        .route("/transfer", post(routes::transfer))
        .route("/job/clean", post(routes::clean))
        .route("/job/submit", post(routes::submit))
        .route("/status/cluster", post(routes::status_cluster))
        .route("/status/op/:name", post(routes::status_op))
        .route("/hadoop/status_update", post(routes::hadoop_status_update))
        .route("/instance/report_fail", post(routes::report_fail))
        .route("/instance/op_status", post(routes::op_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Generate an in-memory self-signed certificate (spec.md §4.7 — the
/// whole deployment already runs on snakeoil TLS; `AgentClient` is built
/// with peer verification disabled to match) and serve `router(state)`
/// over it until the process is killed.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), ControlPlaneError> {
    let cert = generate_simple_self_signed(vec!["hcc-coordinator".to_string()])?;
    let cert_der = cert.cert.der().to_vec();
    let key_der = cert.signing_key.serialize_der();

    let tls_config = axum_server::tls_rustls::RustlsConfig::from_der(vec![cert_der], key_der).await?;

    tracing::info!(%addr, "control plane listening");
    axum_server::bind_rustls(addr, tls_config)
        .serve(router(state).into_make_service_with_connect_info::<SocketAddr>())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use axum::body::Body;
    use axum::http::Request;
    use hcc_core::Config;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        AppState { orchestrator, secret: Arc::from("test-secret") }
    }

    #[tokio::test]
    async fn status_liveness_requires_no_authorization() {
        let app = router(test_state());
        let req = Request::builder()
            .method("GET")
            .uri("/status")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn launch_without_the_secret_is_unauthorized() {
        let app = router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/hadoop/launch")
            .header("content-type", "application/x-www-form-urlencoded")
            .extension(axum::extract::ConnectInfo(
                "1.2.3.4:1000".parse::<SocketAddr>().unwrap(),
            ))
            .body(Body::from("num_slaves=3"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn launch_with_the_secret_succeeds() {
        let app = router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/hadoop/launch")
            .header("content-type", "application/x-www-form-urlencoded")
            .extension(axum::extract::ConnectInfo(
                "1.2.3.4:1000".parse::<SocketAddr>().unwrap(),
            ))
            .body(Body::from("num_slaves=3&secret=test-secret"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn status_update_from_an_external_address_is_unauthorized() {
        let app = router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/hadoop/status_update")
            .header("content-type", "application/x-www-form-urlencoded")
            .extension(axum::extract::ConnectInfo(
                "198.51.100.1:1000".parse::<SocketAddr>().unwrap(),
            ))
            .body(Body::from("data=%7B%7D"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn status_update_from_a_10_dot_address_is_accepted() {
        let app = router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/hadoop/status_update")
            .header("content-type", "application/x-www-form-urlencoded")
            .extension(axum::extract::ConnectInfo(
                "10.0.0.5:1000".parse::<SocketAddr>().unwrap(),
            ))
            .body(Body::from("data=%7B%22ok%22%3Atrue%7D"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }
}
