//! Invoice email dispatch body.

use serde::{Deserialize, Serialize};

use super::record::Record;

/// Email sent to a client with an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailBody {
    /// Recipient address(es), comma-separated.
    pub to: String,
    pub subject: String,
    pub message: String,
    /// Save the recipients on the contact for next time.
    pub store_to: Option<bool>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub attach_pdf: Option<bool>,
    pub sender_name: Option<String>,
    /// File attachment ids.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl EmailBody {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            message: message.into(),
            store_to: Some(false),
            cc: Some(String::new()),
            bcc: Some(String::new()),
            attach_pdf: Some(false),
            sender_name: Some(String::new()),
            attachments: Vec::new(),
        }
    }

    /// Attach the invoice PDF to the email.
    #[must_use]
    pub fn with_pdf(mut self) -> Self {
        self.attach_pdf = Some(true);
        self
    }
}

impl Record for EmailBody {
    const FIELDS: &'static [&'static str] = &[
        "to",
        "subject",
        "message",
        "store_to",
        "cc",
        "bcc",
        "attach_pdf",
        "sender_name",
        "attachments",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::tests::assert_fields;
    use crate::models::record::SerializationPolicy;
    use serde_json::{json, Value};

    #[test]
    fn test_email_body_fields() {
        assert_fields(&EmailBody::new("a@example.com", "Invoice", "Hello"));
    }

    #[test]
    fn test_clean_email_body() {
        let body = EmailBody::new("a@example.com", "Invoice INV-1", "Please find attached")
            .with_pdf();
        let map = body.to_payload(SerializationPolicy::Clean).unwrap();

        assert_eq!(
            Value::Object(map),
            json!({
                "to": "a@example.com",
                "subject": "Invoice INV-1",
                "message": "Please find attached",
                "store_to": false,
                "attach_pdf": true,
                "attachments": []
            })
        );
    }
}
