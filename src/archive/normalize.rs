//! Record normalizer
//!
//! Converts one raw dossier row plus a requested display locale into a
//! canonical `Profile`. Total over arbitrary JSON-shaped input: every field
//! read from the loosely-typed `details` bag substitutes its documented
//! default when missing, null, wrong-shaped, or legacy-shaped. Nothing in
//! this module returns an error.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::locale::{self, Locale};
use crate::model::{
    ArchiveAssignment, ArchiveItem, InfluenceStats, NewsItem, PodcastItem, Profile, ProfileStatus,
    TimelineEvent, VerificationTier, PLACEHOLDER_IMAGE_URL,
};
use crate::store::rows::DossierRow;

/// How a stored record represents its full biography.
///
/// Old records carry a single string; newer ones a per-locale map. Both are
/// resolved here, in one place, instead of optional-chaining at every read
/// site.
#[derive(Debug)]
enum BioSource<'a> {
    /// Single biography string from before translations existed
    Plain(&'a str),
    /// Per-locale map keyed by wire locale strings
    Localized(&'a serde_json::Map<String, JsonValue>),
    /// Absent or wrong-shaped
    Missing,
}

impl<'a> BioSource<'a> {
    fn of(details: &'a JsonValue) -> Self {
        match details.get("fullBio") {
            Some(JsonValue::String(s)) => BioSource::Plain(s),
            Some(JsonValue::Object(map)) => BioSource::Localized(map),
            _ => BioSource::Missing,
        }
    }

    /// Resolve the biography for a locale: plain strings win outright,
    /// localized maps fall back requested locale → English → Somali.
    fn resolve(&self, requested: Locale) -> Option<&'a str> {
        match self {
            BioSource::Plain(s) => Some(s).filter(|s| !s.is_empty()).map(|v| &**v),
            BioSource::Localized(map) => [requested.key(), Locale::En.key(), Locale::So.key()]
                .iter()
                .find_map(|key| {
                    map.get(*key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                }),
            BioSource::Missing => None,
        }
    }
}

/// Read an array field from the details bag.
///
/// Anything that is not an array (absent, null, legacy per-locale map)
/// resolves to an empty list; individual wrong-shaped entries are dropped.
fn array_field<T: DeserializeOwned>(details: &JsonValue, key: &str) -> Vec<T> {
    details
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn str_field<'a>(details: &'a JsonValue, key: &str) -> Option<&'a str> {
    details
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

fn bool_field(details: &JsonValue, key: &str) -> bool {
    details.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Build a canonical `Profile` from one raw row.
///
/// Pure function of its inputs (plus the static category-label table).
/// Enriched assignments are attached as given; the joiner owns producing
/// them. Equal inputs yield deeply equal profiles.
pub fn normalize(
    row: &DossierRow,
    requested: Locale,
    assignments: Vec<ArchiveAssignment>,
) -> Profile {
    let details = &row.details;

    let category = if row.category.is_empty() {
        "Politics".to_string()
    } else {
        row.category.clone()
    };
    let category_label = locale::category_label(requested, &category).to_string();

    // Tier display is only meaningful on verified records; a stored tier on
    // an unverified record reads as Unverified.
    let verified = row.status == "Verified";
    let verification_tier = if verified {
        VerificationTier::parse(&row.verification_level)
    } else {
        VerificationTier::Unverified
    };

    let full_bio = BioSource::of(details)
        .resolve(requested)
        .unwrap_or(&row.bio)
        .to_string();

    let image_url = if row.image_url.is_empty() {
        PLACEHOLDER_IMAGE_URL.to_string()
    } else {
        row.image_url.clone()
    };

    let support = row
        .reputation_score
        .map(|score| score.clamp(0.0, 100.0) as u32)
        .unwrap_or(0);

    Profile {
        id: row
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or("unknown")
            .to_string(),
        name: if row.full_name.is_empty() {
            "Unnamed Profile".to_string()
        } else {
            row.full_name.clone()
        },
        title: row.role.clone(),
        category,
        category_label,
        verified,
        verification_tier,
        image_url,
        short_bio: row.bio.clone(),
        full_bio,
        timeline: array_field::<TimelineEvent>(details, "timeline"),
        location: str_field(details, "location").unwrap_or("").to_string(),
        archives: array_field::<ArchiveItem>(details, "archives"),
        news: array_field::<NewsItem>(details, "news"),
        podcasts: array_field::<PodcastItem>(details, "podcasts"),
        influence: InfluenceStats::from_support(support),
        is_organization: bool_field(details, "isOrganization"),
        status: ProfileStatus::parse(str_field(details, "status").unwrap_or("")),
        date_start: str_field(details, "dateStart").unwrap_or("Unknown").to_string(),
        date_end: str_field(details, "dateEnd").map(str::to_string),
        locked: bool_field(details, "locked"),
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_with_details(details: JsonValue) -> DossierRow {
        DossierRow {
            id: Some("p1".to_string()),
            full_name: "Amina Warsame".to_string(),
            role: "Governor".to_string(),
            bio: "Short bio".to_string(),
            status: "Verified".to_string(),
            reputation_score: Some(70.0),
            image_url: "https://img.example/p1.jpg".to_string(),
            category: "Politics".to_string(),
            verification_level: "Golden".to_string(),
            created_at: None,
            details,
        }
    }

    #[test]
    fn test_missing_details_bag_yields_documented_defaults() {
        let profile = normalize(&row_with_details(JsonValue::Null), Locale::En, Vec::new());

        assert!(profile.timeline.is_empty());
        assert!(profile.archives.is_empty());
        assert!(profile.news.is_empty());
        assert!(profile.podcasts.is_empty());
        assert_eq!(profile.status, ProfileStatus::Active);
        assert!(!profile.is_organization);
        assert!(!profile.locked);
        assert_eq!(profile.date_start, "Unknown");
        assert_eq!(profile.date_end, None);
        assert_eq!(profile.full_bio, profile.short_bio);
    }

    #[test]
    fn test_localized_bio_falls_back_to_english() {
        let row = row_with_details(json!({ "fullBio": { "en": "A", "so": "B" } }));
        let profile = normalize(&row, Locale::Ar, Vec::new());
        assert_eq!(profile.full_bio, "A");
    }

    #[test]
    fn test_localized_bio_picks_requested_locale() {
        let row = row_with_details(json!({ "fullBio": { "en": "A", "so": "B" } }));
        let profile = normalize(&row, Locale::So, Vec::new());
        assert_eq!(profile.full_bio, "B");
    }

    #[test]
    fn test_plain_string_bio_ignores_locale() {
        let row = row_with_details(json!({ "fullBio": "X" }));
        assert_eq!(normalize(&row, Locale::Ar, Vec::new()).full_bio, "X");
        assert_eq!(normalize(&row, Locale::So, Vec::new()).full_bio, "X");
    }

    #[test]
    fn test_empty_localized_values_fall_through_to_short_bio() {
        let row = row_with_details(json!({ "fullBio": { "en": "", "so": "" } }));
        let profile = normalize(&row, Locale::En, Vec::new());
        assert_eq!(profile.full_bio, "Short bio");
    }

    #[test]
    fn test_wrong_shaped_collections_resolve_to_empty() {
        // Legacy per-locale timeline map and scalar media fields
        let row = row_with_details(json!({
            "timeline": { "en": [{ "year": "1960" }] },
            "archives": "not-an-array",
            "news": 7,
            "podcasts": null,
        }));
        let profile = normalize(&row, Locale::En, Vec::new());

        assert!(profile.timeline.is_empty());
        assert!(profile.archives.is_empty());
        assert!(profile.news.is_empty());
        assert!(profile.podcasts.is_empty());
    }

    #[test]
    fn test_timeline_entries_parse_with_per_entry_tolerance() {
        let row = row_with_details(json!({
            "timeline": [
                { "year": "1960", "title": "Independence", "description": "..." },
                "garbage",
                { "title": "Partial entry" },
            ]
        }));
        let profile = normalize(&row, Locale::En, Vec::new());

        assert_eq!(profile.timeline.len(), 2);
        assert_eq!(profile.timeline[0].year, "1960");
        assert_eq!(profile.timeline[1].title, "Partial entry");
        assert_eq!(profile.timeline[1].year, "");
    }

    #[test]
    fn test_unverified_record_reads_unverified_regardless_of_stored_tier() {
        let mut row = row_with_details(JsonValue::Null);
        row.status = "Unverified".to_string();
        row.verification_level = "Nobel".to_string();

        let profile = normalize(&row, Locale::En, Vec::new());
        assert!(!profile.verified);
        assert_eq!(profile.verification_tier, VerificationTier::Unverified);
    }

    #[test]
    fn test_influence_split_derives_neutral_and_fixed_zero_opposition() {
        let profile = normalize(&row_with_details(JsonValue::Null), Locale::En, Vec::new());
        assert_eq!(profile.influence.support, 70);
        assert_eq!(profile.influence.neutral, 30);
        assert_eq!(profile.influence.opposition, 0);

        let mut row = row_with_details(JsonValue::Null);
        row.reputation_score = None;
        let profile = normalize(&row, Locale::En, Vec::new());
        assert_eq!(profile.influence.support, 0);
        assert_eq!(profile.influence.neutral, 100);
    }

    #[test]
    fn test_empty_image_url_falls_back_to_placeholder() {
        let mut row = row_with_details(JsonValue::Null);
        row.image_url = String::new();
        let profile = normalize(&row, Locale::En, Vec::new());
        assert_eq!(profile.image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_locked_flag_flows_through_unchanged() {
        let row = row_with_details(json!({ "locked": true }));
        let profile = normalize(&row, Locale::En, Vec::new());
        assert!(profile.locked);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let row = row_with_details(json!({
            "fullBio": { "en": "A" },
            "timeline": [{ "year": "1991", "title": "War", "description": "" }],
            "locked": false,
            "status": "DECEASED",
        }));
        let first = normalize(&row, Locale::So, Vec::new());
        let second = normalize(&row, Locale::So, Vec::new());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_row_never_panics() {
        let profile = normalize(&DossierRow::default(), Locale::En, Vec::new());
        assert_eq!(profile.id, "unknown");
        assert_eq!(profile.name, "Unnamed Profile");
        assert_eq!(profile.category, "Politics");
    }
}
