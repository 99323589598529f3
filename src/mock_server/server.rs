//! Mock Elorus API server.
//!
//! Provides an axum-based HTTP server that simulates the Elorus API.

use std::sync::Arc;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Elorus API server for testing.
///
/// The server runs in the background and can be used to test the Elorus
/// client against a realistic API implementation. Routes live under the
/// default `v1.1` version prefix.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL with `ElorusClient::with_base_url` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let state = scenario
            .contacts
            .into_iter()
            .fold(MockState::new(), MockState::with_contact);
        scenario
            .invoices
            .into_iter()
            .fold(state, MockState::with_invoice)
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Contact routes
            .route(
                "/contacts/",
                get(handlers::list_contacts).post(handlers::create_contact),
            )
            .route(
                "/contacts/:id/",
                get(handlers::get_contact)
                    .put(handlers::update_contact)
                    .delete(handlers::delete_contact),
            )
            // Invoice routes
            .route(
                "/invoices/",
                get(handlers::list_invoices).post(handlers::create_invoice),
            )
            .route(
                "/invoices/:id/",
                get(handlers::get_invoice)
                    .put(handlers::update_invoice)
                    .patch(handlers::partial_update_invoice)
                    .delete(handlers::delete_invoice),
            )
            .route(
                "/invoices/:id/email/",
                get(handlers::get_invoice_email).post(handlers::send_invoice_email),
            )
            .route("/invoices/:id/pdf/", get(handlers::get_invoice_pdf))
            .route(
                "/invoices/:id/void/",
                axum::routing::post(handlers::void_invoice),
            );

        Router::new()
            .nest(&format!("/{}", crate::DEFAULT_API_VERSION), api)
            // Health check
            .route("/health", get(health_check))
            .layer(ServiceBuilder::new().map_request(log_request))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

fn log_request(request: Request<Body>) -> Request<Body> {
    tracing::debug!(method = %request.method(), uri = %request.uri(), "mock request");
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElorusClient, ElorusError, Page, Payload};
    use serde_json::Value;

    fn client(server: &MockServer) -> ElorusClient {
        ElorusClient::new("test-token", "42")
            .unwrap()
            .with_base_url(server.url())
            .unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_contact_with_elorus_client() {
        let server = MockServer::start().await;
        let client = client(&server);

        let contact = client
            .contacts()
            .get("1")
            .await
            .expect("Failed to get contact")
            .into_json()
            .unwrap();

        assert_eq!(contact["first_name"], "Maria");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_invoices_with_elorus_client() {
        let server = MockServer::start().await;
        let client = client(&server);

        let payload = client
            .invoices()
            .list(&Default::default())
            .await
            .expect("Failed to list invoices");
        let page: Page<Value> = Page::from_payload(payload).unwrap();

        assert_eq!(page.count, 2);
        assert!(!page.has_more());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client(&server);

        let err = client.contacts().get("1").await.unwrap_err();
        assert!(matches!(err, ElorusError::Api { .. }));
        assert_eq!(err.status(), Some(404));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new().with_contact(Fixtures::company_contact(
            "55",
            "Custom Co",
            "EL999",
        ));

        let server = MockServer::with_state(state).await;
        let client = client(&server);

        let payload = client.contacts().get("55").await.unwrap();
        assert!(matches!(payload, Payload::Json(ref c) if c["company"] == "Custom Co"));

        server.shutdown().await;
    }
}
