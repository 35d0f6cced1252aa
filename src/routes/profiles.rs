//! Public read API
//!
//! Serves the current archive snapshot as JSON. The locale query parameter
//! selects which stored translations the snapshot resolves; asking for a
//! locale the snapshot was not built for triggers a rebuild, mirroring the
//! reader UI's refetch-on-language-change behavior.
//!
//! ## Routes
//!
//! - `GET /api/v1/profiles?locale=` - flat normalized profile list
//! - `GET /api/v1/profiles/search?q=&locale=` - substring search
//! - `GET /api/v1/profiles/{id}?locale=` - one profile detail
//! - `GET /api/v1/sectors?locale=` - sector grouping plus sector metadata
//! - `GET /api/v1/partners` - partner organizations
//!
//! A locked profile answers its detail route with a restricted-access
//! placeholder. The snapshot itself carries the full profile; locking is a
//! display directive, not a filter, so lists and groupings keep the entry.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::locale::Locale;
use crate::routes::{error_response, json_response, not_found_response, parse_query};
use crate::server::AppState;

/// Sector listing body: homepage metadata plus the derived grouping
#[derive(Serialize)]
struct SectorsResponse<'a> {
    sectors: &'a [crate::model::SectorMeta],
    grouping: &'a crate::archive::SectorGrouping,
}

fn requested_locale(state: &AppState, query: &str) -> Locale {
    parse_query(query)
        .get("locale")
        .map(|value| Locale::parse(value))
        .unwrap_or_else(|| state.args.locale())
}

/// Handle public /api/v1 requests
pub async fn handle_api_request(
    state: Arc<AppState>,
    method: &Method,
    path: &str,
    query: &str,
) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "read API is GET-only",
            "METHOD_NOT_ALLOWED",
        );
    }

    let locale = requested_locale(&state, query);

    match path {
        "/api/v1/profiles" => {
            let snapshot = state.archive.snapshot_for(locale).await;
            json_response(StatusCode::OK, &snapshot.profiles)
        }

        "/api/v1/profiles/search" => {
            let params = parse_query(query);
            let q = params.get("q").map(String::as_str).unwrap_or("");
            let snapshot = state.archive.snapshot_for(locale).await;
            json_response(StatusCode::OK, &snapshot.search(q))
        }

        "/api/v1/sectors" => {
            let snapshot = state.archive.snapshot_for(locale).await;
            json_response(
                StatusCode::OK,
                &SectorsResponse {
                    sectors: &snapshot.sectors,
                    grouping: &snapshot.grouping,
                },
            )
        }

        "/api/v1/partners" => {
            let snapshot = state.archive.snapshot_for(locale).await;
            json_response(StatusCode::OK, &snapshot.partners)
        }

        _ => {
            if let Some(id) = path.strip_prefix("/api/v1/profiles/") {
                if id.is_empty() || id.contains('/') {
                    return not_found_response(path);
                }
                return profile_detail(state, id, locale).await;
            }
            not_found_response(path)
        }
    }
}

async fn profile_detail(state: Arc<AppState>, id: &str, locale: Locale) -> Response<Full<Bytes>> {
    let snapshot = state.archive.snapshot_for(locale).await;

    let Some(profile) = snapshot.profile(id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            &format!("no profile {}", id),
            "PROFILE_NOT_FOUND",
        );
    };

    if profile.locked {
        // Restricted-access placeholder: identity only, no content
        return json_response(
            StatusCode::OK,
            &json!({
                "id": profile.id,
                "name": profile.name,
                "locked": true,
                "restricted": true,
                "message": "Access to this dossier is restricted.",
            }),
        );
    }

    json_response(StatusCode::OK, profile)
}
