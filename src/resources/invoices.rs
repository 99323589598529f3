//! Invoices resource.

use reqwest::Method;
use serde_json::{json, Map, Value};

use super::id_segment;
use crate::client::{ElorusClient, RequestOptions};
use crate::error::Result;
use crate::models::{EmailBody, Invoice, InvoiceListQuery, Record, SerializationPolicy};
use crate::response::Payload;

/// Invoices and their email bodies drop null and empty fields.
const POLICY: SerializationPolicy = SerializationPolicy::Clean;

/// Operations on `/invoices/`.
#[derive(Debug, Clone, Copy)]
pub struct Invoices<'a> {
    client: &'a ElorusClient,
}

impl<'a> Invoices<'a> {
    pub(crate) fn new(client: &'a ElorusClient) -> Self {
        Self { client }
    }

    /// List invoices matching the query.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &InvoiceListQuery) -> Result<Payload> {
        self.client
            .request(Method::GET, "invoices/", None, Some(query), &RequestOptions::default())
            .await
    }

    /// Create an invoice.
    #[tracing::instrument(skip(self, invoice), fields(custom_id = %invoice.custom_id))]
    pub async fn create(&self, invoice: &Invoice) -> Result<Payload> {
        let payload = invoice.to_payload(POLICY)?;
        self.send(Method::POST, "invoices/", Some(&payload)).await
    }

    /// Fetch an invoice by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Payload> {
        self.send(Method::GET, &Self::path(id, ""), None).await
    }

    /// Replace an invoice.
    #[tracing::instrument(skip(self, invoice))]
    pub async fn update(&self, id: &str, invoice: &Invoice) -> Result<Payload> {
        let payload = invoice.to_payload(POLICY)?;
        self.send(Method::PUT, &Self::path(id, ""), Some(&payload)).await
    }

    /// Update only the fields the cleaned invoice carries.
    #[tracing::instrument(skip(self, invoice))]
    pub async fn partial_update(&self, id: &str, invoice: &Invoice) -> Result<Payload> {
        let payload = invoice.to_payload(POLICY)?;
        self.send(Method::PATCH, &Self::path(id, ""), Some(&payload)).await
    }

    /// Delete an invoice.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Payload> {
        self.send(Method::DELETE, &Self::path(id, ""), None).await
    }

    /// Email the invoice to its client.
    #[tracing::instrument(skip(self, email_body))]
    pub async fn send_email(&self, id: &str, email_body: &EmailBody) -> Result<Payload> {
        let payload = email_body.to_payload(POLICY)?;
        self.send(Method::POST, &Self::path(id, "email/"), Some(&payload))
            .await
    }

    /// Fetch the email delivery status of an invoice.
    #[tracing::instrument(skip(self))]
    pub async fn get_email(&self, id: &str) -> Result<Payload> {
        self.send(Method::GET, &Self::path(id, "email/"), None).await
    }

    /// Download the invoice PDF.
    ///
    /// Returns [`Payload::File`] carrying the server-provided filename.
    #[tracing::instrument(skip(self))]
    pub async fn get_pdf(&self, id: &str) -> Result<Payload> {
        self.send(Method::GET, &Self::path(id, "pdf/"), None).await
    }

    /// Mark an invoice void, or restore it with `is_void = false`.
    #[tracing::instrument(skip(self))]
    pub async fn mark_void(&self, id: &str, is_void: bool) -> Result<Payload> {
        let payload = void_payload(is_void);
        self.send(Method::POST, &Self::path(id, "void/"), Some(&payload))
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Map<String, Value>>,
    ) -> Result<Payload> {
        self.client
            .request(method, path, payload, None::<&()>, &RequestOptions::default())
            .await
    }

    fn path(id: &str, action: &str) -> String {
        format!("invoices/{}/{action}", id_segment(id))
    }
}

fn void_payload(is_void: bool) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("is_void".to_string(), json!(is_void));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Invoices::path("42", ""), "invoices/42/");
        assert_eq!(Invoices::path("42", "email/"), "invoices/42/email/");
        assert_eq!(Invoices::path("42", "pdf/"), "invoices/42/pdf/");
        assert_eq!(Invoices::path("42", "void/"), "invoices/42/void/");
    }

    #[test]
    fn test_void_payload() {
        assert_eq!(Value::Object(void_payload(true)), json!({"is_void": true}));
        assert_eq!(Value::Object(void_payload(false)), json!({"is_void": false}));
    }
}
