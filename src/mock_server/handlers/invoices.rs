//! Invoice endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use super::{authorize, list_response, not_found, object, ListQuery};
use crate::mock_server::state::{Collection, MockState};

/// Body of POST /v1.1/invoices/{id}/void/
#[derive(Debug, Deserialize)]
pub struct VoidParams {
    pub is_void: bool,
}

/// GET /v1.1/invoices/
pub async fn list_invoices(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    list_response(&state, Collection::Invoices, &query)
}

/// POST /v1.1/invoices/
pub async fn create_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let mut record = match object(body).and_then(validate_invoice) {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    let draft = record.get("draft").and_then(Value::as_bool).unwrap_or(false);
    record.insert("is_void".to_string(), json!(false));
    record.insert(
        "status".to_string(),
        json!(if draft { "draft" } else { "issued" }),
    );
    let stored = state.insert(Collection::Invoices, record);
    (StatusCode::CREATED, Json(stored)).into_response()
}

/// GET /v1.1/invoices/{id}/
pub async fn get_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    match state.get(Collection::Invoices, &id) {
        Some(invoice) => (StatusCode::OK, Json(invoice.clone())).into_response(),
        None => not_found(),
    }
}

/// PUT /v1.1/invoices/{id}/
pub async fn update_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let record = match object(body).and_then(validate_invoice) {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };
    match state.replace(Collection::Invoices, &id, record) {
        Some(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        None => not_found(),
    }
}

/// PATCH /v1.1/invoices/{id}/
pub async fn partial_update_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let fields = match object(body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };
    match state.merge(Collection::Invoices, &id, fields) {
        Some(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        None => not_found(),
    }
}

/// DELETE /v1.1/invoices/{id}/
pub async fn delete_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if state.remove(Collection::Invoices, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

/// POST /v1.1/invoices/{id}/email/
pub async fn send_invoice_email(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if state.get(Collection::Invoices, &id).is_none() {
        return not_found();
    }
    let email = match object(body) {
        Ok(email) => email,
        Err(rejection) => return rejection,
    };
    for field in ["to", "subject", "message"] {
        if !email.contains_key(field) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ field: ["This field is required."] })),
            )
                .into_response();
        }
    }

    let sent = json!({
        "to": email["to"],
        "subject": email["subject"],
        "status": "sent",
        "attach_pdf": email.get("attach_pdf").cloned().unwrap_or(json!(false)),
    });
    state.emails.entry(id).or_default().push(sent.clone());
    (StatusCode::OK, Json(sent)).into_response()
}

/// GET /v1.1/invoices/{id}/email/
pub async fn get_invoice_email(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if state.get(Collection::Invoices, &id).is_none() {
        return not_found();
    }
    let emails = state.emails.get(&id).cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({ "count": emails.len(), "results": emails })),
    )
        .into_response()
}

/// GET /v1.1/invoices/{id}/pdf/
pub async fn get_invoice_pdf(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let Some(invoice) = state.get(Collection::Invoices, &id) else {
        return not_found();
    };

    let number = invoice
        .get("number")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(id.as_str());
    let disposition = format!("attachment; filename={number}.pdf");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        state.pdf_bytes.clone(),
    )
        .into_response()
}

/// POST /v1.1/invoices/{id}/void/
pub async fn void_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(params): Json<VoidParams>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let mut fields = Map::new();
    fields.insert("is_void".to_string(), json!(params.is_void));
    fields.insert(
        "status".to_string(),
        json!(if params.is_void { "void" } else { "issued" }),
    );
    match state.merge(Collection::Invoices, &id, fields) {
        Some(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        None => not_found(),
    }
}

/// An invoice needs a date and at least one line.
fn validate_invoice(record: Map<String, Value>) -> Result<Map<String, Value>, Response> {
    let mut errors = Map::new();
    if !record.contains_key("date") {
        errors.insert("date".to_string(), json!(["This field is required."]));
    }
    let has_items = record
        .get("items")
        .and_then(Value::as_array)
        .map(|items| !items.is_empty())
        .unwrap_or(false);
    if !has_items {
        errors.insert("items".to_string(), json!(["At least one item is required."]));
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err((StatusCode::BAD_REQUEST, Json(Value::Object(errors))).into_response())
    }
}
