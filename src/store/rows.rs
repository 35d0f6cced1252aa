//! Raw store rows
//!
//! Wire shapes for the three reconciled tables. Every field is defaulted so
//! that any row the store has ever written, including legacy records from
//! before the `details` bag settled, deserializes without error. The
//! normalizer owns interpreting them; nothing here validates.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One dossier row as stored.
///
/// `details` is the loosely-typed bag that has drifted over the system's
/// life: biographies as plain strings or per-locale maps, optional timeline
/// and media arrays, lifecycle fields. It is carried verbatim as JSON and
/// resolved field by field in `crate::archive::normalize`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DossierRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    /// Short biography shown on cards
    #[serde(default)]
    pub bio: String,
    /// Verification flag: the literal "Verified" or anything else
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation_score: Option<f64>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub verification_level: String,
    #[serde(default)]
    pub details: JsonValue,
}

/// One archive category row as stored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub section_type: String,
}

/// One assignment row as stored.
///
/// `user_id` is the owning profile id; rows missing it are malformed join
/// rows and are dropped by the joiner rather than crashing downstream
/// consumers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssignmentRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_note: Option<String>,
}
