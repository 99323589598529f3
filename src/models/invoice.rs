//! Invoice and line item models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{BillingAddress, TrackingCategory};
use super::record::Record;

/// How line totals are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    /// Totals are computed from unit values.
    #[default]
    Initial,
    /// Unit values are computed back from totals.
    Total,
}

/// An invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub description: String,
    /// myDATA income classification category (e.g. `category1_1`).
    pub mydata_classification_category: String,
    /// myDATA income classification type (e.g. `E3_561_001`).
    pub mydata_classification_type: String,
    /// Decimal amounts are strings on the wire.
    pub unit_value: Option<String>,
    pub unit_discount: Option<String>,
    pub unit_total: Option<String>,
    /// Product id.
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub unit_measure: Option<u32>,
    #[serde(default)]
    pub taxes: Vec<String>,
    pub title: Option<String>,
}

impl Item {
    /// A line with zero amounts and quantity 1.
    pub fn new(
        description: impl Into<String>,
        classification_category: impl Into<String>,
        classification_type: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            mydata_classification_category: classification_category.into(),
            mydata_classification_type: classification_type.into(),
            unit_value: Some("0.00".to_string()),
            unit_discount: Some("0.00".to_string()),
            unit_total: Some("0.00".to_string()),
            product: Some(String::new()),
            quantity: Some(1),
            unit_measure: None,
            taxes: Vec::new(),
            title: Some(String::new()),
        }
    }
}

impl Record for Item {
    const FIELDS: &'static [&'static str] = &[
        "description",
        "mydata_classification_category",
        "mydata_classification_type",
        "unit_value",
        "unit_discount",
        "unit_total",
        "product",
        "quantity",
        "unit_measure",
        "taxes",
        "title",
    ];
}

/// An Elorus invoice.
///
/// Invoices are sent with null and empty-string fields removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub custom_id: String,
    /// Document type id.
    pub documenttype: u64,
    pub currency_code: Option<String>,
    pub date: NaiveDate,
    /// Contact id of the client.
    pub client: u64,
    /// myDATA document type (e.g. `1.1`).
    pub mydata_document_type: String,
    pub due_days: Option<u32>,
    pub billing_address: Option<BillingAddress>,
    pub shipping_address: Option<BillingAddress>,
    pub items: Vec<Item>,
    pub trackingcategories: Option<Vec<TrackingCategory>>,
    pub client_display_name: Option<String>,
    pub draft: Option<bool>,
    pub sequence_id: Option<String>,
    pub number: Option<String>,
    pub client_profession: Option<String>,
    pub client_vat_number: Option<String>,
    pub client_contact_person: Option<String>,
    pub client_phone_number: Option<String>,
    pub exchange_rate: Option<String>,
    pub client_email: Option<String>,
    pub calculator_mode: Option<CalculatorMode>,
    /// Withholding tax ids.
    #[serde(default)]
    pub withholding_taxes: Vec<String>,
    pub template_id: Option<String>,
    pub public_notes: Option<String>,
}

impl Invoice {
    /// An invoice with the API's defaults for every optional field.
    pub fn new(
        custom_id: impl Into<String>,
        documenttype: u64,
        date: NaiveDate,
        client: u64,
        mydata_document_type: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            custom_id: custom_id.into(),
            documenttype,
            currency_code: None,
            date,
            client,
            mydata_document_type: mydata_document_type.into(),
            due_days: None,
            billing_address: None,
            shipping_address: None,
            items,
            trackingcategories: None,
            client_display_name: Some(String::new()),
            draft: Some(false),
            sequence_id: None,
            number: Some(String::new()),
            client_profession: Some(String::new()),
            client_vat_number: Some(String::new()),
            client_contact_person: Some(String::new()),
            client_phone_number: Some(String::new()),
            exchange_rate: Some("1.0".to_string()),
            client_email: Some(String::new()),
            calculator_mode: Some(CalculatorMode::Initial),
            withholding_taxes: Vec::new(),
            template_id: None,
            public_notes: Some(String::new()),
        }
    }
}

impl Record for Invoice {
    const FIELDS: &'static [&'static str] = &[
        "custom_id",
        "documenttype",
        "currency_code",
        "date",
        "client",
        "mydata_document_type",
        "due_days",
        "billing_address",
        "shipping_address",
        "items",
        "trackingcategories",
        "client_display_name",
        "draft",
        "sequence_id",
        "number",
        "client_profession",
        "client_vat_number",
        "client_contact_person",
        "client_phone_number",
        "exchange_rate",
        "client_email",
        "calculator_mode",
        "withholding_taxes",
        "template_id",
        "public_notes",
    ];
}

/// Query parameters for listing invoices.
///
/// Only fields that are set end up in the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceListQuery {
    /// Free-text search across number, client and notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only invoices for this contact id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Status filter (e.g. `issued`, `paid`, `void`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Only drafts (`true`) or issued documents (`false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    /// Earliest issue date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_from: Option<NaiveDate>,

    /// Latest issue date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_to: Option<NaiveDate>,

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
    use crate::models::record::SerializationPolicy;
    use serde_json::{json, Value};

    fn invoice() -> Invoice {
        Invoice::new(
            "INV-1",
            3,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            1001,
            "1.1",
            vec![Item::new("Consulting", "category1_3", "E3_561_001")],
        )
    }

    #[test]
    fn test_invoice_declares_every_field() {
        assert_fields(&invoice());
        assert_fields(&Item::new("x", "c", "t"));
    }

    #[test]
    fn test_clean_payload_drops_null_and_empty() {
        let map = invoice().to_payload(SerializationPolicy::Clean).unwrap();

        for dropped in [
            "currency_code",
            "due_days",
            "billing_address",
            "trackingcategories",
            "client_display_name",
            "sequence_id",
            "number",
            "template_id",
            "public_notes",
        ] {
            assert!(!map.contains_key(dropped), "{dropped} should be dropped");
        }

        assert_eq!(map["date"], "2024-03-15");
        assert_eq!(map["draft"], false);
        assert_eq!(map["exchange_rate"], "1.0");
        assert_eq!(map["calculator_mode"], "initial");
        assert_eq!(map["withholding_taxes"], json!([]));
    }

    #[test]
    fn test_clean_keeps_nested_items_intact() {
        let map = invoice().to_payload(SerializationPolicy::Clean).unwrap();
        let item = &map["items"][0];
        // Nested records are not cleaned
        assert_eq!(item["product"], "");
        assert_eq!(item["unit_measure"], Value::Null);
        assert_eq!(item["quantity"], 1);
    }

    #[test]
    fn test_clean_payload_round_trip() {
        let mut original = invoice();
        original.currency_code = Some("EUR".to_string());
        original.due_days = Some(30);
        original.billing_address = Some(BillingAddress {
            address_line: "Ermou 10".to_string(),
            city: "Athens".to_string(),
            state: "Attica".to_string(),
            zip: "10563".to_string(),
            country: "GR".to_string(),
        });
        original.trackingcategories = Some(vec![TrackingCategory::new("1", "2")]);

        let map = original.to_payload(SerializationPolicy::Clean).unwrap();
        let sent: Vec<String> = map.keys().cloned().collect();
        let decoded: Invoice = serde_json::from_value(Value::Object(map)).unwrap();
        let again = decoded.to_payload(SerializationPolicy::Clean).unwrap();

        assert_eq!(again.keys().cloned().collect::<Vec<_>>(), sent);
        assert_eq!(decoded.billing_address, original.billing_address);
        assert_eq!(decoded.items, original.items);
        assert_eq!(decoded.due_days, Some(30));
        // Empty strings come back as absent
        assert_eq!(decoded.number, None);
    }

    #[test]
    fn test_list_query_dates() {
        let query = InvoiceListQuery {
            period_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            draft: Some(false),
            ..Default::default()
        };
        let qs = serde_qs::to_string(&query).unwrap();
        assert!(qs.contains("period_from=2024-01-01"));
        assert!(qs.contains("draft=false"));
        assert!(!qs.contains("period_to"));
    }
}
