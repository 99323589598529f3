//! HTTP request handlers for the mock server.

pub mod contacts;
pub mod invoices;

pub use contacts::*;
pub use invoices::*;

use std::collections::HashMap;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::mock_server::state::{Collection, MockState};

/// Query parameters accepted by list endpoints.
pub type ListQuery = HashMap<String, String>;

/// Check throttling and the authentication headers.
///
/// Mirrors the API: throttling first, then 401 for a bad token, then 403
/// for an organization the token cannot act on.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    if state.throttled {
        return Err(error(
            StatusCode::TOO_MANY_REQUESTS,
            "Request was throttled. Expected available in 60 seconds.",
        ));
    }

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let token = header("authorization").and_then(|v| v.strip_prefix("Token "));
    let token_ok = match (&state.required_token, token) {
        (Some(required), Some(token)) => required == token,
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if !token_ok {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid token."));
    }

    let organization = header("x-elorus-organization");
    let organization_ok = match (&state.required_organization, organization) {
        (Some(required), Some(org)) => required == org,
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if !organization_ok {
        return Err(error(
            StatusCode::FORBIDDEN,
            "You do not have permission to perform this action.",
        ));
    }

    Ok(())
}

/// A DRF-style `{"detail": ...}` error response.
pub(crate) fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

pub(crate) fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found.")
}

/// Build the list envelope for a collection.
pub(crate) fn list_response(state: &MockState, collection: Collection, query: &ListQuery) -> Response {
    let all = state.list(collection, query.get("search").map(String::as_str));
    let count = all.len();

    let page = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let page_size = query
        .get("page_size")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(100)
        .max(1);

    let start = (page - 1).saturating_mul(page_size);
    let results: Vec<Value> = all.into_iter().skip(start).take(page_size).cloned().collect();
    let next = (start.saturating_add(page_size) < count)
        .then(|| format!("?page={}", page.saturating_add(1)));
    let previous = (page > 1).then(|| format!("?page={}", page - 1));

    (
        StatusCode::OK,
        Json(json!({
            "count": count,
            "next": next,
            "previous": previous,
            "results": results,
        })),
    )
        .into_response()
}

/// Require a JSON object body.
pub(crate) fn object(body: Value) -> Result<Map<String, Value>, Response> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Invalid data. Expected a dictionary."]})),
        )
            .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn list_body(state: &MockState, query: &[(&str, &str)]) -> Value {
        let query: ListQuery = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let response = list_response(state, Collection::Contacts, &query);
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn state() -> MockState {
        MockState::new()
            .with_contact(json!({"id": "1", "first_name": "Alpha"}))
            .with_contact(json!({"id": "2", "first_name": "Beta"}))
    }

    #[tokio::test]
    async fn test_list_response_pages() {
        let body = list_body(&state(), &[("page", "1"), ("page_size", "1")]).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["next"], "?page=2");
        assert_eq!(body["previous"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_response_huge_page_values() {
        let max = usize::MAX.to_string();
        let body = list_body(&state(), &[("page", max.as_str()), ("page_size", max.as_str())]).await;

        assert_eq!(body["count"], 2);
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["next"], Value::Null);
    }
}
