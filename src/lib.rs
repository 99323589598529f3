//! Elorus API client library.
//!
//! A typed Rust client for the Elorus invoicing REST API: contacts,
//! invoices, invoice email dispatch and PDF downloads.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use elorus::{Contact, ElorusClient, Invoice, Item, Payload};
//!
//! #[tokio::main]
//! async fn main() -> elorus::Result<()> {
//!     // Create client from environment variables
//!     let client = ElorusClient::from_env()?;
//!
//!     // Create a contact
//!     let contact = Contact::new("C-0001", "Maria", "Papadopoulou");
//!     let created = client.contacts().create(&contact).await?;
//!     println!("Created: {:?}", created.as_json());
//!
//!     // Issue an invoice and download its PDF
//!     let invoice = Invoice::new(
//!         "INV-0001",
//!         3,
//!         NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//!         1001,
//!         "1.1",
//!         vec![Item::new("Consulting", "category1_3", "E3_561_001")],
//!     );
//!     client.invoices().create(&invoice).await?;
//!
//!     if let Payload::File(pdf) = client.invoices().get_pdf("1001").await? {
//!         pdf.save_to(".")?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ElorusClient`] - dispatcher: authentication, versioned URLs, one
//!   HTTP session per call
//! - [`Contacts`] / [`Invoices`] - resource facades borrowed from the client
//! - [`interpret`] - turns every response into a [`Payload`] or a typed
//!   [`ElorusError`]
//!
//! Contacts are sent with every declared field; invoices and email bodies
//! drop null and empty-string fields (see [`SerializationPolicy`]).
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ELORUS_API_KEY` (required) - Your Elorus API token
//! - `ELORUS_ORGANIZATION_ID` (required) - Organization to act on
//! - `ELORUS_DEMO` (optional) - Target the demo environment
//! - `ELORUS_API_URL` (optional) - Base URL (defaults to `https://api.elorus.com`)
//! - `ELORUS_API_VERSION` (optional) - API version (defaults to `v1.1`)

mod auth;
mod client;
mod error;
mod models;
mod pagination;
mod resources;
mod response;

pub mod cli;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::Credentials;
pub use client::{ElorusClient, RequestOptions, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{ElorusError, Result};
pub use pagination::Page;
pub use resources::{Contacts, Invoices};
pub use response::{interpret, Download, Payload, RawResponse};

// Re-export models
pub use models::{
    // Serialization
    clean,
    Record,
    SerializationPolicy,
    // Shared records
    Address,
    AddressType,
    BillingAddress,
    Email,
    Phone,
    TrackingCategory,
    // Contact types
    Contact,
    ContactListQuery,
    // Invoice types
    CalculatorMode,
    EmailBody,
    Invoice,
    InvoiceListQuery,
    Item,
};
