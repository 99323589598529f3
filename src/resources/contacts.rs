//! Contacts resource.

use reqwest::Method;
use serde_json::{Map, Value};

use super::id_segment;
use crate::client::{ElorusClient, RequestOptions};
use crate::error::Result;
use crate::models::{Contact, ContactListQuery, Record, SerializationPolicy};
use crate::response::Payload;

/// Contacts are always sent with every declared field.
const POLICY: SerializationPolicy = SerializationPolicy::Full;

/// Operations on `/contacts/`.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    client: &'a ElorusClient,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(client: &'a ElorusClient) -> Self {
        Self { client }
    }

    /// List contacts matching the query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use elorus::{ContactListQuery, ElorusClient, Page};
    /// use serde_json::Value;
    ///
    /// # async fn example() -> elorus::Result<()> {
    /// let client = ElorusClient::from_env()?;
    /// let query = ContactListQuery {
    ///     search: Some("acme".to_string()),
    ///     ..Default::default()
    /// };
    /// let page: Page<Value> = Page::from_payload(client.contacts().list(&query).await?)?;
    /// println!("{} contacts", page.count);
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &ContactListQuery) -> Result<Payload> {
        self.client
            .request(Method::GET, "contacts/", None, Some(query), &RequestOptions::default())
            .await
    }

    /// Create a contact.
    #[tracing::instrument(skip(self, contact), fields(custom_id = %contact.custom_id))]
    pub async fn create(&self, contact: &Contact) -> Result<Payload> {
        let payload = contact.to_payload(POLICY)?;
        self.send(Method::POST, "contacts/", Some(&payload)).await
    }

    /// Fetch a contact by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Payload> {
        self.send(Method::GET, &Self::path(id), None).await
    }

    /// Replace a contact.
    #[tracing::instrument(skip(self, contact))]
    pub async fn update(&self, id: &str, contact: &Contact) -> Result<Payload> {
        let payload = contact.to_payload(POLICY)?;
        self.send(Method::PUT, &Self::path(id), Some(&payload)).await
    }

    /// Delete a contact.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Payload> {
        self.send(Method::DELETE, &Self::path(id), None).await
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

    fn path(id: &str) -> String {
        format!("contacts/{}/", id_segment(id))
    }
}
