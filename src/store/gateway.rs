//! Repository gateway trait
//!
//! The one seam between the reconciliation core and whatever holds the rows.
//! Two implementations ship: `RestGateway` against the hosted store and
//! `MemoryGateway` for dev mode and tests.
//!
//! Fetches may legitimately return empty collections (an optional table not
//! yet provisioned). Callers treat a failed fetch of an auxiliary source as
//! "no data available", not as a reason to block the rest of the archive -
//! that policy lives in `crate::archive::service`, not here.

use async_trait::async_trait;

use crate::model::{Partner, SectorMeta};
use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};
use crate::types::Result;

/// Fetch/mutate boundary to the record store
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// Fetch all dossier rows
    async fn fetch_dossiers(&self) -> Result<Vec<DossierRow>>;

    /// Fetch all category rows, ordered by sector then name.
    ///
    /// The aggregator preserves this fetch-time ordering; implementations
    /// must sort here, not downstream.
    async fn fetch_categories(&self) -> Result<Vec<CategoryRow>>;

    /// Fetch all assignment rows
    async fn fetch_assignments(&self) -> Result<Vec<AssignmentRow>>;

    /// Fetch partner organizations
    async fn fetch_partners(&self) -> Result<Vec<Partner>>;

    /// Fetch sector homepage metadata
    async fn fetch_sector_meta(&self) -> Result<Vec<SectorMeta>>;

    /// Insert or update a dossier row, returning its id
    async fn upsert_dossier(&self, row: DossierRow) -> Result<String>;

    /// Delete a dossier row
    async fn delete_dossier(&self, id: &str) -> Result<()>;

    /// Replace the full assignment list for one profile
    async fn upsert_assignments(&self, profile_id: &str, rows: Vec<AssignmentRow>) -> Result<()>;

    /// Insert or update a category row, returning its id
    async fn upsert_category(&self, row: CategoryRow) -> Result<i64>;

    /// Delete a category row. Assignments referencing it become dangling and
    /// are tolerated by the joiner.
    async fn delete_category(&self, id: i64) -> Result<()>;

    /// Insert or update a partner, returning its id
    async fn upsert_partner(&self, partner: Partner) -> Result<String>;

    /// Delete a partner
    async fn delete_partner(&self, id: &str) -> Result<()>;

    /// Insert or update sector homepage metadata
    async fn upsert_sector_meta(&self, meta: SectorMeta) -> Result<()>;
}
