//! Resource facades.
//!
//! Each facade borrows the client and exposes only the operations its
//! resource supports. Facades pick the verb, path and serialization policy
//! and delegate everything else to [`ElorusClient::request`].
//!
//! [`ElorusClient::request`]: crate::ElorusClient::request

mod contacts;
mod invoices;

pub use contacts::Contacts;
pub use invoices::Invoices;

/// Path segment for a resource id, percent-encoded.
fn id_segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_segment_encodes_reserved_characters() {
        assert_eq!(id_segment("1234"), "1234");
        assert_eq!(id_segment("a/b?c"), "a%2Fb%3Fc");
    }
}
