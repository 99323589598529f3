//! Mock Elorus API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Elorus
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use elorus::mock_server::MockServer;
//! use elorus::ElorusClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ElorusClient::new("test-token", "42")
//!         .unwrap()
//!         .with_base_url(server.url())
//!         .unwrap();
//!
//!     // Server comes with default fixtures
//!     let contact = client.contacts().get("1").await.unwrap();
//!     assert_eq!(contact.as_json().unwrap()["first_name"], "Maria");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{Collection, MockState};
