//! Pagination utilities for Elorus list responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ElorusError, Result};
use crate::response::Payload;

/// A page of results from an Elorus list endpoint.
///
/// Mirrors the API envelope: `{"count", "next", "previous", "results"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list response.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not JSON or does not match the
    /// list envelope.
    pub fn from_payload(payload: Payload) -> Result<Self> {
        let value = payload.into_json().ok_or_else(|| {
            ElorusError::Parse(serde::de::Error::custom("list response is not JSON"))
        })?;
        Self::from_value(value)
    }

    /// Decode a list envelope from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<T> Page<T> {
    /// Whether the server reported another page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
