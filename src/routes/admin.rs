//! Admin mutation API
//!
//! Guarded by the static admin bearer key from configuration (open in dev
//! mode). Every handler performs its store write through the archive
//! service, which follows the write with one full refetch-and-renormalize
//! pass, so responses reflect the post-mutation epoch.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::model::{Partner, SectorMeta};
use crate::routes::{error_response, json_response, not_found_response};
use crate::server::AppState;
use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};
use crate::types::DiiwaanError;

#[derive(Deserialize)]
struct LockBody {
    locked: bool,
}

fn is_authorized(state: &AppState, req: &Request<Incoming>) -> bool {
    if state.args.dev_mode {
        return true;
    }
    let Some(expected) = state.args.admin_api_key.as_deref() else {
        return false;
    };
    req.headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token == expected)
        .unwrap_or(false)
}

async fn read_json<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T, DiiwaanError> {
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| DiiwaanError::BadRequest(format!("body read failed: {}", e)))?
        .to_bytes();
    Ok(serde_json::from_slice(&body)?)
}

fn from_error(err: DiiwaanError) -> Response<Full<Bytes>> {
    let (status, body) = err.into_status_code_and_body();
    error_response(status, &body, "ADMIN_ERROR")
}

/// Handle /api/v1/admin requests
pub async fn handle_admin_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    if !is_authorized(&state, &req) {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "admin key required",
            "UNAUTHORIZED",
        );
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let rest = path.strip_prefix("/api/v1/admin").unwrap_or("");
    info!(%method, path = rest, "admin request");

    match (method, rest) {
        (Method::POST, "/dossiers") => match read_json::<DossierRow>(req).await {
            Ok(row) => match state.archive.upsert_dossier(row).await {
                Ok(id) => json_response(StatusCode::OK, &json!({ "id": id })),
                Err(e) => from_error(e),
            },
            Err(e) => from_error(e),
        },

        (Method::POST, "/lock-all") => match state.archive.set_all_locks(true).await {
            Ok(locked) => json_response(StatusCode::OK, &json!({ "locked": locked })),
            Err(e) => from_error(e),
        },

        (Method::POST, "/unlock-all") => match state.archive.set_all_locks(false).await {
            Ok(unlocked) => json_response(StatusCode::OK, &json!({ "unlocked": unlocked })),
            Err(e) => from_error(e),
        },

        (Method::POST, "/categories") => match read_json::<CategoryRow>(req).await {
            Ok(row) => match state.archive.upsert_category(row).await {
                Ok(id) => json_response(StatusCode::OK, &json!({ "id": id })),
                Err(e) => from_error(e),
            },
            Err(e) => from_error(e),
        },

        (Method::POST, "/partners") => match read_json::<Partner>(req).await {
            Ok(partner) => match state.archive.upsert_partner(partner).await {
                Ok(id) => json_response(StatusCode::OK, &json!({ "id": id })),
                Err(e) => from_error(e),
            },
            Err(e) => from_error(e),
        },

        (Method::POST, "/sectors") => match read_json::<SectorMeta>(req).await {
            Ok(meta) => match state.archive.upsert_sector_meta(meta).await {
                Ok(()) => json_response(StatusCode::OK, &json!({ "ok": true })),
                Err(e) => from_error(e),
            },
            Err(e) => from_error(e),
        },

        (method, rest) => handle_entity_request(state, req, method, rest).await,
    }
}

/// Routes with an id segment: /dossiers/{id}[/assignments|/lock],
/// /categories/{id}, /partners/{id}
async fn handle_entity_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
    method: Method,
    rest: &str,
) -> Response<Full<Bytes>> {
    if let Some(tail) = rest.strip_prefix("/dossiers/") {
        let (id, action) = tail.split_once('/').unwrap_or((tail, ""));
        if id.is_empty() {
            return not_found_response(rest);
        }
        let id = id.to_string();

        return match (method, action) {
            (Method::DELETE, "") => match state.archive.delete_dossier(&id).await {
                Ok(()) => json_response(StatusCode::OK, &json!({ "deleted": id })),
                Err(e) => from_error(e),
            },
            (Method::PUT, "assignments") => match read_json::<Vec<AssignmentRow>>(req).await {
                Ok(rows) => match state.archive.replace_assignments(&id, rows).await {
                    Ok(()) => json_response(StatusCode::OK, &json!({ "ok": true })),
                    Err(e) => from_error(e),
                },
                Err(e) => from_error(e),
            },
            (Method::POST, "lock") => match read_json::<LockBody>(req).await {
                Ok(body) => match state.archive.set_lock(&id, body.locked).await {
                    Ok(()) => json_response(StatusCode::OK, &json!({ "locked": body.locked })),
                    Err(e) => from_error(e),
                },
                Err(e) => from_error(e),
            },
            _ => not_found_response(rest),
        };
    }

    if let Some(id) = rest.strip_prefix("/categories/") {
        if method == Method::DELETE {
            let Ok(id) = id.parse::<i64>() else {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "category id must be numeric",
                    "BAD_ID",
                );
            };
            return match state.archive.delete_category(id).await {
                Ok(()) => json_response(StatusCode::OK, &json!({ "deleted": id })),
                Err(e) => from_error(e),
            };
        }
        return not_found_response(rest);
    }

    if let Some(id) = rest.strip_prefix("/partners/") {
        if method == Method::DELETE {
            return match state.archive.delete_partner(id).await {
                Ok(()) => json_response(StatusCode::OK, &json!({ "deleted": id })),
                Err(e) => from_error(e),
            };
        }
        return not_found_response(rest);
    }

    not_found_response(rest)
}
