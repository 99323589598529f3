//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Contact Fixtures
    // =========================================================================

    /// Create a minimal contact record.
    pub fn minimal_contact(id: &str, first_name: &str, last_name: &str) -> Value {
        json!({
            "id": id,
            "custom_id": "",
            "first_name": first_name,
            "last_name": last_name,
            "display_name": format!("{first_name} {last_name}"),
            "company": "",
            "vat_number": "",
            "active": true,
            "is_client": true,
            "is_supplier": false,
            "client_type": 1,
            "default_currency_code": "EUR",
            "default_language": "en",
            "addresses": [],
            "email": [],
            "phones": []
        })
    }

    /// Create a company contact.
    pub fn company_contact(id: &str, company: &str, vat_number: &str) -> Value {
        let mut contact = Self::minimal_contact(id, "", "");
        contact["company"] = json!(company);
        contact["display_name"] = json!(company);
        contact["vat_number"] = json!(vat_number);
        contact["client_type"] = json!(2);
        contact
    }

    // =========================================================================
    // Invoice Fixtures
    // =========================================================================

    /// Create an issued invoice for a client.
    pub fn issued_invoice(id: &str, number: &str, client_id: &str, total: &str) -> Value {
        json!({
            "id": id,
            "custom_id": "",
            "documenttype": "3",
            "number": number,
            "date": "2024-03-15",
            "client": client_id,
            "client_display_name": "Acme S.A.",
            "currency_code": "EUR",
            "draft": false,
            "is_void": false,
            "status": "issued",
            "total": total,
            "items": [{
                "description": "Consulting",
                "quantity": 1,
                "unit_value": total,
                "unit_total": total,
                "taxes": []
            }]
        })
    }

    /// Create a draft invoice.
    pub fn draft_invoice(id: &str, client_id: &str) -> Value {
        let mut invoice = Self::issued_invoice(id, "", client_id, "0.00");
        invoice["draft"] = json!(true);
        invoice["status"] = json!("draft");
        invoice
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Create a complete test scenario with contacts and invoices.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            contacts: vec![
                Self::minimal_contact("1", "Maria", "Papadopoulou"),
                Self::company_contact("2", "Acme S.A.", "EL123456789"),
            ],
            invoices: vec![
                Self::issued_invoice("100", "INV-0001", "2", "124.00"),
                Self::draft_invoice("101", "2"),
            ],
        }
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub contacts: Vec<Value>,
    pub invoices: Vec<Value>,
}
