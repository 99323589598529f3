//! Contact model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{Address, Email, Phone, TrackingCategory};
use super::record::Record;

/// Default currency for new contacts.
pub const DEFAULT_CURRENCY_CODE: &str = "EUR";

/// Default document language for new contacts.
pub const DEFAULT_LANGUAGE: &str = "en";

/// An Elorus contact (client and/or supplier).
///
/// Contacts are sent with every declared field, including nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub custom_id: String,
    pub first_name: String,
    pub last_name: String,
    pub addresses: Option<Vec<Address>>,
    pub email: Option<Vec<Email>>,
    pub tracking_categories: Option<Vec<TrackingCategory>>,
    #[serde(default)]
    pub phones: Vec<Phone>,
    /// Tax ids applied by default to this contact's documents.
    #[serde(default)]
    pub default_taxes: Vec<String>,
    /// 1 = individual, 2 = company, as defined by Elorus.
    pub client_type: u8,
    pub active: Option<bool>,
    pub company: Option<String>,
    pub profession: Option<String>,
    pub vat_number: Option<String>,
    pub is_client: Option<bool>,
    pub is_supplier: Option<bool>,
    /// ISO 4217 currency code.
    pub default_currency_code: Option<String>,
    pub default_language: Option<String>,
    pub default_theme: Option<String>,
}

impl Contact {
    /// A contact with the API's defaults for every optional field.
    pub fn new(
        custom_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            custom_id: custom_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            addresses: None,
            email: None,
            tracking_categories: None,
            phones: Vec::new(),
            default_taxes: Vec::new(),
            client_type: 1,
            active: Some(true),
            company: Some(String::new()),
            profession: Some(String::new()),
            vat_number: Some(String::new()),
            is_client: Some(false),
            is_supplier: Some(false),
            default_currency_code: Some(DEFAULT_CURRENCY_CODE.to_string()),
            default_language: Some(DEFAULT_LANGUAGE.to_string()),
            default_theme: None,
        }
    }
}

impl Record for Contact {
    const FIELDS: &'static [&'static str] = &[
        "custom_id",
        "first_name",
        "last_name",
        "addresses",
        "email",
        "tracking_categories",
        "phones",
        "default_taxes",
        "client_type",
        "active",
        "company",
        "profession",
        "vat_number",
        "is_client",
        "is_supplier",
        "default_currency_code",
        "default_language",
        "default_theme",
    ];
}

/// Query parameters for listing contacts.
///
/// Only fields that are set end up in the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactListQuery {
    /// Free-text search across names, company and VAT number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only active (`true`) or inactive (`false`) contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Only clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_client: Option<bool>,

    /// Only suppliers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_supplier: Option<bool>,

    /// Sort field, prefixed with `-` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,

    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Any other filter supported by the endpoint.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::tests::assert_fields;
    use crate::models::common::AddressType;
    use crate::models::record::SerializationPolicy;
    use serde_json::{json, Value};

    #[test]
    fn test_new_contact_defaults() {
        let contact = Contact::new("C-1", "Maria", "Papadopoulou");
        assert_eq!(contact.client_type, 1);
        assert_eq!(contact.active, Some(true));
        assert_eq!(contact.default_currency_code.as_deref(), Some("EUR"));
        assert_eq!(contact.default_language.as_deref(), Some("en"));
        assert!(contact.phones.is_empty());
    }

    #[test]
    fn test_full_payload_has_every_field() {
        let contact = Contact::new("C-1", "Maria", "Papadopoulou");
        assert_fields(&contact);

        let map = contact.to_payload(SerializationPolicy::Full).unwrap();
        assert_eq!(map["addresses"], Value::Null);
        assert_eq!(map["company"], "");
        assert_eq!(map["default_theme"], Value::Null);
    }

    #[test]
    fn test_full_payload_round_trip() {
        let mut contact = Contact::new("C-2", "Nikos", "Georgiou");
        contact.addresses = Some(vec![Address {
            id: "a1".to_string(),
            address: "Ermou 10".to_string(),
            city: "Athens".to_string(),
            state: "Attica".to_string(),
            zip: "10563".to_string(),
            country: "GR".to_string(),
            branch_code: "0".to_string(),
            ad_type: AddressType::Ship,
        }]);
        contact.email = Some(vec![Email::new("nikos@example.com").primary()]);
        contact.phones = vec![Phone::new("2100000000")];
        contact.is_client = Some(true);

        let map = contact.to_payload(SerializationPolicy::Full).unwrap();
        let decoded: Contact = serde_json::from_value(Value::Object(map)).unwrap();
        assert_eq!(decoded, contact);
    }

    #[test]
    fn test_list_query_only_sends_set_fields() {
        let mut query = ContactListQuery {
            search: Some("acme".to_string()),
            is_client: Some(true),
            page: Some(2),
            ..Default::default()
        };
        query
            .extra
            .insert("modified_after".to_string(), "2024-01-01".to_string());

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({"search": "acme", "is_client": true, "page": 2, "modified_after": "2024-01-01"})
        );

        let qs = serde_qs::to_string(&query).unwrap();
        assert!(qs.contains("search=acme"));
        assert!(qs.contains("is_client=true"));
        assert!(!qs.contains("ordering"));
    }
}
