//! Contact endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use super::{authorize, list_response, not_found, object, ListQuery};
use crate::mock_server::state::{Collection, MockState};

/// GET /v1.1/contacts/
pub async fn list_contacts(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    list_response(&state, Collection::Contacts, &query)
}

/// POST /v1.1/contacts/
pub async fn create_contact(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let record = match object(body).and_then(validate_contact) {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    let stored = state.insert(Collection::Contacts, record);
    (StatusCode::CREATED, Json(stored)).into_response()
}

/// GET /v1.1/contacts/{id}/
pub async fn get_contact(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    match state.get(Collection::Contacts, &id) {
        Some(contact) => (StatusCode::OK, Json(contact.clone())).into_response(),
        None => not_found(),
    }
}

/// PUT /v1.1/contacts/{id}/
pub async fn update_contact(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let record = match object(body).and_then(validate_contact) {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    match state.replace(Collection::Contacts, &id, record) {
        Some(contact) => (StatusCode::OK, Json(contact)).into_response(),
        None => not_found(),
    }
}

/// DELETE /v1.1/contacts/{id}/
pub async fn delete_contact(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if state.remove(Collection::Contacts, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

/// A contact needs either a person's first name or a company name.
fn validate_contact(record: Map<String, Value>) -> Result<Map<String, Value>, Response> {
    let has = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    };
    if has("first_name") || has("company") {
        Ok(record)
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Either first name or company is required."]})),
        )
            .into_response())
    }
}
