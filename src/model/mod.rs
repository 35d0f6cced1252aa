//! Canonical domain types for the Diiwaan archive
//!
//! These are the core-owned shapes produced by the reconciliation pipeline.
//! Raw store rows (schema-drifted, loosely typed) live in `crate::store::rows`;
//! everything here is fully resolved and never carries a null-ish hole.

mod archive;
mod partner;
mod profile;

pub use archive::{ArchiveAssignment, ArchiveCategory, SectorTag};
pub use partner::{Partner, SectorMeta};
pub use profile::{
    ArchiveItem, InfluenceStats, NewsItem, PodcastItem, Profile, ProfileStatus, TimelineEvent,
    VerificationTier, PLACEHOLDER_IMAGE_URL,
};
