//! Nested records shared by contacts and invoices.

use serde::{Deserialize, Serialize};

use super::record::Record;

/// Address role on a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    /// Billing address.
    Bill,
    /// Shipping address.
    Ship,
}

/// A contact address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub branch_code: String,
    pub ad_type: AddressType,
}

impl Record for Address {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "address",
        "city",
        "state",
        "zip",
        "country",
        "branch_code",
        "ad_type",
    ];
}

/// A contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub email: String,
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(default)]
    pub id: Option<String>,
}

impl Email {
    /// A non-primary email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            primary: Some(false),
            id: None,
        }
    }

    /// Mark as the contact's primary address.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }
}

impl Record for Email {
    const FIELDS: &'static [&'static str] = &["email", "primary", "id"];
}

/// A contact phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub phone: String,
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(default)]
    pub id: Option<String>,
}

impl Phone {
    /// A non-primary phone number.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            primary: Some(false),
            id: None,
        }
    }

    /// Mark as the contact's primary number.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }
}

impl Record for Phone {
    const FIELDS: &'static [&'static str] = &["phone", "primary", "id"];
}

/// A tracking category option assigned to a contact or invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingCategory {
    /// Tracking category id.
    pub trackingcategory: String,
    /// Selected option id.
    pub option: String,
}

impl TrackingCategory {
    pub fn new(trackingcategory: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            trackingcategory: trackingcategory.into(),
            option: option.into(),
        }
    }
}

impl Record for TrackingCategory {
    const FIELDS: &'static [&'static str] = &["trackingcategory", "option"];
}

/// Billing or shipping address printed on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Record for BillingAddress {
    const FIELDS: &'static [&'static str] = &["address_line", "city", "state", "zip", "country"];
}
