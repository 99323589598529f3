//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Elorus API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Shared state for the mock server.
///
/// Records are stored as the JSON objects the API would return, keyed by
/// their `id`. Wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Contacts indexed by ID.
    pub contacts: BTreeMap<String, Value>,

    /// Invoices indexed by ID.
    pub invoices: BTreeMap<String, Value>,

    /// Emails sent per invoice ID, in send order.
    pub emails: HashMap<String, Vec<Value>>,

    /// PDF bytes served for invoice downloads.
    pub pdf_bytes: Vec<u8>,

    /// If set, requests must carry `Authorization: Token <token>`.
    pub required_token: Option<String>,

    /// If set, requests must carry this `X-Elorus-Organization`.
    pub required_organization: Option<String>,

    /// When true every request is rejected with 429.
    pub throttled: bool,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            pdf_bytes: b"%PDF-1.4\n%mock\n".to_vec(),
            next_id: 1000,
            ..Default::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a contact to the state. The record must carry an `id`.
    pub fn with_contact(mut self, contact: Value) -> Self {
        if let Some(id) = record_id(&contact) {
            self.contacts.insert(id, contact);
        }
        self
    }

    /// Add an invoice to the state. The record must carry an `id`.
    pub fn with_invoice(mut self, invoice: Value) -> Self {
        if let Some(id) = record_id(&invoice) {
            self.invoices.insert(id, invoice);
        }
        self
    }

    /// Set the required authentication token and organization.
    pub fn with_credentials(mut self, token: &str, organization_id: &str) -> Self {
        self.required_token = Some(token.to_string());
        self.required_organization = Some(organization_id.to_string());
        self
    }

    /// Reject every request with 429.
    pub fn with_throttling(mut self) -> Self {
        self.throttled = true;
        self
    }

    /// Allocate a fresh record ID.
    pub fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    /// Store a new record under a fresh ID and return the stored copy.
    pub fn insert(&mut self, collection: Collection, mut record: Map<String, Value>) -> Value {
        let id = self.next_id();
        record.insert("id".to_string(), Value::String(id.clone()));
        let record = Value::Object(record);
        self.collection_mut(collection).insert(id, record.clone());
        record
    }

    /// Replace a record, keeping its ID. Returns `None` if it does not exist.
    pub fn replace(
        &mut self,
        collection: Collection,
        id: &str,
        mut record: Map<String, Value>,
    ) -> Option<Value> {
        let store = self.collection_mut(collection);
        if !store.contains_key(id) {
            return None;
        }
        record.insert("id".to_string(), Value::String(id.to_string()));
        let record = Value::Object(record);
        store.insert(id.to_string(), record.clone());
        Some(record)
    }

    /// Merge fields into a record. Returns `None` if it does not exist.
    pub fn merge(
        &mut self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Option<Value> {
        let record = self.collection_mut(collection).get_mut(id)?;
        if let Value::Object(existing) = record {
            for (key, value) in fields {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        Some(record.clone())
    }

    /// Remove a record, returning whether it existed.
    pub fn remove(&mut self, collection: Collection, id: &str) -> bool {
        self.collection_mut(collection).remove(id).is_some()
    }

    /// Get a record by ID.
    pub fn get(&self, collection: Collection, id: &str) -> Option<&Value> {
        self.collection(collection).get(id)
    }

    /// List records whose text fields contain `search` (case-insensitive).
    pub fn list(&self, collection: Collection, search: Option<&str>) -> Vec<&Value> {
        let needle = search.map(str::to_lowercase);
        self.collection(collection)
            .values()
            .filter(|record| match &needle {
                Some(needle) => matches_search(record, needle),
                None => true,
            })
            .collect()
    }

    fn collection(&self, collection: Collection) -> &BTreeMap<String, Value> {
        match collection {
            Collection::Contacts => &self.contacts,
            Collection::Invoices => &self.invoices,
        }
    }

    fn collection_mut(&mut self, collection: Collection) -> &mut BTreeMap<String, Value> {
        match collection {
            Collection::Contacts => &mut self.contacts,
            Collection::Invoices => &mut self.invoices,
        }
    }
}

/// The record collections served by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Contacts,
    Invoices,
}

fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(Value::as_str).map(str::to_string)
}

fn matches_search(record: &Value, needle: &str) -> bool {
    record
        .as_object()
        .map(|fields| {
            fields.values().any(|v| {
                v.as_str()
                    .map(|s| s.to_lowercase().contains(needle))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_state_insert_assigns_id() {
        let mut state = MockState::new();
        let stored = state.insert(Collection::Contacts, object(json!({"first_name": "Maria"})));

        let id = stored["id"].as_str().unwrap();
        assert_eq!(state.get(Collection::Contacts, id), Some(&stored));
    }

    #[test]
    fn test_state_list_with_search() {
        let state = MockState::new()
            .with_contact(json!({"id": "1", "first_name": "Alpha", "company": "Acme"}))
            .with_contact(json!({"id": "2", "first_name": "Beta", "company": "Acme"}))
            .with_contact(json!({"id": "3", "first_name": "Gamma", "company": "Other"}));

        assert_eq!(state.list(Collection::Contacts, None).len(), 3);
        assert_eq!(state.list(Collection::Contacts, Some("acme")).len(), 2);
        assert_eq!(state.list(Collection::Contacts, Some("GAMMA")).len(), 1);
    }

    #[test]
    fn test_state_merge_and_replace() {
        let mut state = MockState::new().with_invoice(json!({"id": "7", "number": "A-1", "draft": true}));

        let merged = state
            .merge(Collection::Invoices, "7", object(json!({"draft": false, "id": "x"})))
            .unwrap();
        assert_eq!(merged, json!({"id": "7", "number": "A-1", "draft": false}));

        let replaced = state
            .replace(Collection::Invoices, "7", object(json!({"number": "B-2"})))
            .unwrap();
        assert_eq!(replaced, json!({"id": "7", "number": "B-2"}));

        assert!(state.replace(Collection::Invoices, "missing", Map::new()).is_none());
        assert!(state.remove(Collection::Invoices, "7"));
        assert!(!state.remove(Collection::Invoices, "7"));
    }
}
