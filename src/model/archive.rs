//! Sector tags, archive categories, and enriched assignments
//!
//! A sector is a top-level classification of public life; categories are
//! named groupings inside a sector; an assignment records that a profile
//! held a role in a category over a date range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level archive sectors.
///
/// The set has grown over the system's life and will grow again. Values not
/// yet known to this build deserialize as `Unknown` instead of failing, and
/// the aggregator skips them (see `crate::archive::aggregate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectorTag {
    Politics,
    Judiciary,
    Security,
    Business,
    ArtsCulture,
    TheScholars,
    ThePioneers,
    PublicInstitutions,
    Entrepreneurs,
    /// Forward-compatibility catch-all for sectors introduced server-side
    /// before this build knows them
    #[serde(other)]
    Unknown,
}

impl SectorTag {
    /// All sectors this build knows, in display order
    pub const KNOWN: [SectorTag; 9] = [
        SectorTag::Politics,
        SectorTag::Judiciary,
        SectorTag::Security,
        SectorTag::Business,
        SectorTag::ArtsCulture,
        SectorTag::TheScholars,
        SectorTag::ThePioneers,
        SectorTag::PublicInstitutions,
        SectorTag::Entrepreneurs,
    ];

    /// Wire string for this sector, as stored in category rows
    pub fn as_str(self) -> &'static str {
        match self {
            SectorTag::Politics => "POLITICS",
            SectorTag::Judiciary => "JUDICIARY",
            SectorTag::Security => "SECURITY",
            SectorTag::Business => "BUSINESS",
            SectorTag::ArtsCulture => "ARTS_CULTURE",
            SectorTag::TheScholars => "THE_SCHOLARS",
            SectorTag::ThePioneers => "THE_PIONEERS",
            SectorTag::PublicInstitutions => "PUBLIC_INSTITUTIONS",
            SectorTag::Entrepreneurs => "ENTREPRENEURS",
            SectorTag::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire string. Anything unrecognized maps to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "POLITICS" => SectorTag::Politics,
            "JUDICIARY" => SectorTag::Judiciary,
            "SECURITY" => SectorTag::Security,
            "BUSINESS" => SectorTag::Business,
            "ARTS_CULTURE" => SectorTag::ArtsCulture,
            "THE_SCHOLARS" => SectorTag::TheScholars,
            "THE_PIONEERS" => SectorTag::ThePioneers,
            "PUBLIC_INSTITUTIONS" => SectorTag::PublicInstitutions,
            "ENTREPRENEURS" => SectorTag::Entrepreneurs,
            _ => SectorTag::Unknown,
        }
    }
}

impl fmt::Display for SectorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named grouping of assignments inside a sector (e.g. "Banks" under
/// the business sector)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveCategory {
    pub id: i64,
    #[serde(rename = "category_name")]
    pub name: String,
    #[serde(rename = "section_type")]
    pub sector: SectorTag,
}

/// An enriched assignment: a profile held a role in a category.
///
/// `category` is the joined category record and is legitimately absent when
/// the referenced category has been deleted; the assignment still renders in
/// the profile's own list, just without sector context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveAssignment {
    pub id: i64,
    /// Owning profile id
    pub user_id: String,
    pub category_id: i64,
    pub start_date: String,
    /// Absent means present/ongoing for display purposes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Free-text role note, e.g. "Chairman"
    pub title_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ArchiveCategory>,
}
