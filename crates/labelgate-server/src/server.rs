use crate::handlers::*;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Route the scheduler's extender config points `filterVerb` at
pub const FILTER_PATH: &str = "/apiv1/filter";

/// Extender server configuration
#[derive(Clone)]
pub struct Config {
    /// Address to listen on
    pub listen_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

/// Scheduler extender HTTP server
pub struct ExtenderServer {
    config: Config,
    state: Arc<AppState>,
}

impl ExtenderServer {
    /// Create a new extender server
    pub fn new(config: Config, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        Router::new()
            // Health checks
            .route("/healthz", get(healthz))
            .route("/livez", get(livez))
            .route("/readyz", get(readyz))
            // Extender verbs
            .route(FILTER_PATH, post(filter))
            // Add tracing and state
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and run the server
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        self.serve(listener).await
    }

    /// Run the server on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve_until(listener, CancellationToken::new()).await
    }

    /// Run the server until `token` is cancelled, then drain in-flight requests
    pub async fn serve_until(
        self,
        listener: TcpListener,
        token: CancellationToken,
    ) -> Result<(), std::io::Error> {
        let app = self.build_router();

        info!(
            "Starting server on {} (verbosity {})",
            listener.local_addr()?,
            self.state.verbosity
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
    }
}

/// Health check endpoint
async fn healthz() -> &'static str {
    "ok"
}

/// Liveness probe
async fn livez() -> &'static str {
    "ok"
}

/// Readiness probe
async fn readyz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use labelgate_core::{ExtenderFilterResult, Verbosity};
    use labelgate_filter::{FilterEngine, NO_NODES_ERROR};
    use serde_json::json;
    use tower::ServiceExt;

    const REASON: &str = "Doesn't have the label extender='true'";

    fn router() -> Router {
        ExtenderServer::new(Config::default(), Arc::new(AppState::default())).build_router()
    }

    fn filter_request(body: impl Into<Body>) -> Request<Body> {
        Request::post(FILTER_PATH)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn args_with_nodes(nodes: serde_json::Value) -> String {
        json!({
            "Pod": {"metadata": {"namespace": "default", "name": "nginx"}},
            "Nodes": {"items": nodes},
            "NodeNames": null
        })
        .to_string()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_eligible_and_failed_nodes() {
        let body = args_with_nodes(json!([
            {"metadata": {"name": "n1", "labels": {"extender": "true"}}},
            {"metadata": {"name": "n2", "labels": {}}}
        ]));

        let (status, body) = send(router(), filter_request(body)).await;
        assert_eq!(status, StatusCode::OK);

        let result: ExtenderFilterResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.node_names, Some(vec!["n1".to_string()]));
        assert_eq!(result.failed_nodes.len(), 1);
        assert_eq!(result.failed_nodes["n2"], REASON);
        assert_eq!(result.error, "");
    }

    #[tokio::test]
    async fn test_no_candidates_is_not_found_with_body() {
        let (status, body) = send(router(), filter_request(args_with_nodes(json!([])))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let result: ExtenderFilterResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.error, NO_NODES_ERROR);
        assert!(result.eligible().is_empty());
        assert!(result.failed_nodes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_not_found() {
        let (status, body) = send(router(), filter_request(Body::empty())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_found() {
        let (status, body) = send(router(), filter_request(r#"{"Pod":"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_case_label_rejected() {
        let body = args_with_nodes(json!([
            {"metadata": {"name": "n1", "labels": {"extender": "TRUE"}}}
        ]));

        let (status, body) = send(router(), filter_request(body)).await;
        assert_eq!(status, StatusCode::OK);

        let result: ExtenderFilterResult = serde_json::from_slice(&body).unwrap();
        assert!(result.eligible().is_empty());
        assert_eq!(result.failed_nodes["n1"], REASON);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_byte_identical() {
        let body = args_with_nodes(json!([
            {"metadata": {"name": "b", "labels": {"extender": "true"}}},
            {"metadata": {"name": "a"}},
            {"metadata": {"name": "c", "labels": {"extender": "false"}}}
        ]));
        let router = router();

        let (_, first) = send(router.clone(), filter_request(body.clone())).await;
        let (_, second) = send(router, filter_request(body)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_not_found() {
        let state = AppState::new(FilterEngine::default(), Verbosity::default()).with_max_body_bytes(8);
        let router = ExtenderServer::new(Config::default(), Arc::new(state)).build_router();

        let body = args_with_nodes(json!([{"metadata": {"name": "n1"}}]));
        let (status, _) = send(router, filter_request(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_large_cluster_is_not_capped() {
        let images: Vec<serde_json::Value> = (0..60)
            .map(|i| {
                json!({
                    "names": [format!("registry.example.com/team/image-{}@sha256:{:064}", i, i)],
                    "sizeBytes": 123456789
                })
            })
            .collect();
        let nodes: Vec<serde_json::Value> = (0..300)
            .map(|i| {
                json!({
                    "metadata": {"name": format!("node-{}", i), "labels": {"extender": "true"}},
                    "status": {"images": images}
                })
            })
            .collect();
        let body = args_with_nodes(json!(nodes));
        assert!(body.len() > 2 * 1024 * 1024);

        let (status, body) = send(router(), filter_request(body)).await;
        assert_eq!(status, StatusCode::OK);

        let result: ExtenderFilterResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.eligible().len(), 300);
        assert!(result.failed_nodes.is_empty());
    }

    #[tokio::test]
    async fn test_filter_rejects_other_methods() {
        let request = Request::get(FILTER_PATH).body(Body::empty()).unwrap();

        let (status, _) = send(router(), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_independent_servers() {
        let quiet = ExtenderServer::new(Config::default(), Arc::new(AppState::default()));
        let verbose = ExtenderServer::new(
            Config::default(),
            Arc::new(AppState::new(FilterEngine::default(), Verbosity::new(5))),
        );

        let body = args_with_nodes(json!([
            {"metadata": {"name": "n1", "labels": {"extender": "true"}}}
        ]));

        let (quiet_status, quiet_body) =
            send(quiet.build_router(), filter_request(body.clone())).await;
        let (verbose_status, verbose_body) = send(verbose.build_router(), filter_request(body)).await;

        assert_eq!(quiet_status, StatusCode::OK);
        assert_eq!(verbose_status, StatusCode::OK);
        assert_eq!(quiet_body, verbose_body);
    }

    #[tokio::test]
    async fn test_unknown_path_not_found() {
        let request = Request::post("/api/v1/filter")
            .body(Body::from(args_with_nodes(json!([]))))
            .unwrap();

        let (status, _) = send(router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_healthz() {
        let request = Request::get("/healthz").body(Body::empty()).unwrap();
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}
