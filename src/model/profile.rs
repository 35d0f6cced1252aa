//! The canonical Profile and its attached collections
//!
//! A Profile is the fully reconciled view of one dossier record. It is built
//! fresh on every normalization pass and never mutated in place; a new value
//! supersedes the old one wholesale when the snapshot is rebuilt.

use serde::{Deserialize, Serialize};

use super::ArchiveAssignment;

/// Fallback portrait used when a record carries no image URL
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// One entry in a profile's life/history timeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// An archived document attached to a profile (scan, award, photograph)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchiveItem {
    #[serde(default)]
    pub id: String,
    /// Document kind: PDF, IMAGE, or AWARD
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A press mention attached to a profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A podcast appearance attached to a profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodcastItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Influence split shown on the profile page.
///
/// `opposition` is constant zero in the stored data model; it is carried as a
/// field, not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InfluenceStats {
    pub support: u32,
    pub neutral: u32,
    pub opposition: u32,
}

impl InfluenceStats {
    /// Derive the split from a stored reputation score (0-100)
    pub fn from_support(support: u32) -> Self {
        let support = support.min(100);
        Self {
            support,
            neutral: 100 - support,
            opposition: 0,
        }
    }
}

/// Verification tiers, ranked for display only.
///
/// The ordering (Unverified < Standard < Golden < Hero < Nobel) drives badge
/// selection; no business rule consumes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerificationTier {
    #[default]
    Unverified,
    Standard,
    Golden,
    Hero,
    Nobel,
}

impl VerificationTier {
    /// Parse a stored tier string. Unknown values read as `Standard`, the
    /// editor's default for verified records.
    pub fn parse(s: &str) -> Self {
        match s {
            "Nobel" => VerificationTier::Nobel,
            "Hero" => VerificationTier::Hero,
            "Golden" => VerificationTier::Golden,
            _ => VerificationTier::Standard,
        }
    }
}

/// Lifecycle status of the person or organization behind a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    #[default]
    Active,
    Deceased,
    Retired,
    Closed,
}

impl ProfileStatus {
    /// Parse a stored status string, defaulting to `Active`
    pub fn parse(s: &str) -> Self {
        match s {
            "DECEASED" => ProfileStatus::Deceased,
            "RETIRED" => ProfileStatus::Retired,
            "CLOSED" => ProfileStatus::Closed,
            _ => ProfileStatus::Active,
        }
    }
}

/// Fully reconciled dossier record.
///
/// Every field is resolved: collections are never null, the biography has
/// already been picked for the requested locale, and legacy store shapes
/// have been folded into the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    /// Raw category key as stored
    pub category: String,
    /// Display label for the category in the requested locale
    pub category_label: String,
    pub verified: bool,
    pub verification_tier: VerificationTier,
    pub image_url: String,
    pub short_bio: String,
    pub full_bio: String,
    pub timeline: Vec<TimelineEvent>,
    pub location: String,
    pub archives: Vec<ArchiveItem>,
    pub news: Vec<NewsItem>,
    pub podcasts: Vec<PodcastItem>,
    pub influence: InfluenceStats,
    pub is_organization: bool,
    pub status: ProfileStatus,
    /// Free-text start date ("Born"/"Established"), not parsed as a real date
    pub date_start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    /// When set, the detail view must render a restricted-access placeholder.
    /// The profile still flows through lists and groupings unchanged.
    pub locked: bool,
    pub assignments: Vec<ArchiveAssignment>,
}
