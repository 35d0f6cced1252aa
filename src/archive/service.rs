//! Archive service: the recompute loop around the core
//!
//! Owns the gateway handle and the snapshot slot. Every mutation goes
//! through the store and is followed by exactly one full
//! refetch-and-renormalize pass; the store is the single source of truth
//! and nothing is patched incrementally.
//!
//! Fetch failures of individual sources degrade to "no data available" for
//! that source rather than blocking the rest of the archive; the failure is
//! logged here and an empty collection flows into the core.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::archive::aggregate::aggregate;
use crate::archive::join::join_assignments;
use crate::archive::normalize::normalize;
use crate::archive::snapshot::{ArchiveSnapshot, SnapshotStore};
use crate::locale::Locale;
use crate::model::{Partner, Profile, SectorMeta};
use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};
use crate::store::RepositoryGateway;
use crate::types::{DiiwaanError, Result};

/// Reconciliation service over one repository gateway
pub struct ArchiveService {
    gateway: Arc<dyn RepositoryGateway>,
    snapshots: SnapshotStore,
    epoch: AtomicU64,
}

impl ArchiveService {
    /// Create a service with an empty initial snapshot; call `rebuild` to
    /// populate it
    pub fn new(gateway: Arc<dyn RepositoryGateway>, locale: Locale) -> Self {
        Self {
            gateway,
            snapshots: SnapshotStore::new(locale),
            epoch: AtomicU64::new(0),
        }
    }

    /// The current snapshot
    pub async fn current(&self) -> Arc<ArchiveSnapshot> {
        self.snapshots.load().await
    }

    /// Snapshot for a locale, rebuilding when the requested locale differs
    /// from the one the current snapshot was resolved for
    pub async fn snapshot_for(&self, locale: Locale) -> Arc<ArchiveSnapshot> {
        let current = self.snapshots.load().await;
        if current.locale == locale && current.epoch > 0 {
            return current;
        }
        self.rebuild(locale).await
    }

    /// Full refetch-and-renormalize pass.
    ///
    /// Queries all row sets, joins assignments to categories, normalizes
    /// every dossier for the locale, derives the sector grouping, and swaps
    /// in the new snapshot under a bumped epoch.
    pub async fn rebuild(&self, locale: Locale) -> Arc<ArchiveSnapshot> {
        let dossiers = self.fetch_or_empty("dossiers", self.gateway.fetch_dossiers().await);
        let categories = self.fetch_or_empty("categories", self.gateway.fetch_categories().await);
        let assignments =
            self.fetch_or_empty("assignments", self.gateway.fetch_assignments().await);
        let partners = self.fetch_or_empty("partners", self.gateway.fetch_partners().await);
        let sectors = self.fetch_or_empty("sectors", self.gateway.fetch_sector_meta().await);

        let mut buckets = join_assignments(&assignments, &categories);
        let profiles: Vec<Arc<Profile>> = dossiers
            .iter()
            .map(|row| {
                let list = row
                    .id
                    .as_deref()
                    .and_then(|id| buckets.remove(id))
                    .unwrap_or_default();
                Arc::new(normalize(row, locale, list))
            })
            .collect();

        let grouping = aggregate(&profiles);
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            epoch,
            %locale,
            profiles = profiles.len(),
            placements = grouping.placement_count(),
            "archive snapshot rebuilt"
        );

        let snapshot = Arc::new(ArchiveSnapshot {
            epoch,
            locale,
            profiles,
            grouping,
            sectors,
            partners,
        });
        self.snapshots.swap(Arc::clone(&snapshot)).await;
        snapshot
    }

    fn fetch_or_empty<T>(&self, source: &str, result: Result<Vec<T>>) -> Vec<T> {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!(source, error = %e, "fetch failed, continuing with empty set");
                Vec::new()
            }
        }
    }

    async fn locale(&self) -> Locale {
        self.snapshots.load().await.locale
    }

    // --- Mutations: each performs its writes, then triggers one rebuild ---

    /// Insert or update a dossier, returning its id
    pub async fn upsert_dossier(&self, row: DossierRow) -> Result<String> {
        let id = self.gateway.upsert_dossier(row).await?;
        self.rebuild(self.locale().await).await;
        Ok(id)
    }

    /// Delete a dossier
    pub async fn delete_dossier(&self, id: &str) -> Result<()> {
        self.gateway.delete_dossier(id).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Replace the full assignment list for one profile
    pub async fn replace_assignments(
        &self,
        profile_id: &str,
        rows: Vec<AssignmentRow>,
    ) -> Result<()> {
        self.gateway.upsert_assignments(profile_id, rows).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Insert or update a category
    pub async fn upsert_category(&self, row: CategoryRow) -> Result<i64> {
        let id = self.gateway.upsert_category(row).await?;
        self.rebuild(self.locale().await).await;
        Ok(id)
    }

    /// Delete a category. Assignments referencing it become dangling and the
    /// joiner tolerates them.
    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.gateway.delete_category(id).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Insert or update a partner
    pub async fn upsert_partner(&self, partner: Partner) -> Result<String> {
        let id = self.gateway.upsert_partner(partner).await?;
        self.rebuild(self.locale().await).await;
        Ok(id)
    }

    /// Delete a partner
    pub async fn delete_partner(&self, id: &str) -> Result<()> {
        self.gateway.delete_partner(id).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Insert or update sector homepage metadata
    pub async fn upsert_sector_meta(&self, meta: SectorMeta) -> Result<()> {
        self.gateway.upsert_sector_meta(meta).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Set the lock flag on one dossier
    pub async fn set_lock(&self, id: &str, locked: bool) -> Result<()> {
        let rows = self.gateway.fetch_dossiers().await?;
        let row = rows
            .into_iter()
            .find(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| DiiwaanError::NotFound(format!("dossier {}", id)))?;

        self.gateway.upsert_dossier(with_lock(row, locked)).await?;
        self.rebuild(self.locale().await).await;
        Ok(())
    }

    /// Set the lock flag on every dossier.
    ///
    /// Issues one write per record concurrently and collects ALL of them
    /// before the rebuild; renormalizing early would misreport lock state
    /// for records whose write had not yet settled.
    pub async fn set_all_locks(&self, locked: bool) -> Result<usize> {
        let rows = self.gateway.fetch_dossiers().await?;
        let total = rows.len();

        let writes = rows
            .into_iter()
            .map(|row| self.gateway.upsert_dossier(with_lock(row, locked)));
        let results = join_all(writes).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, total, "some lock writes failed");
        }

        self.rebuild(self.locale().await).await;
        Ok(total - failed)
    }
}

/// Patch the lock flag into a row's details bag, repairing a non-object bag
fn with_lock(mut row: DossierRow, locked: bool) -> DossierRow {
    if !row.details.is_object() {
        row.details = JsonValue::Object(serde_json::Map::new());
    }
    if let Some(details) = row.details.as_object_mut() {
        details.insert("locked".to_string(), JsonValue::Bool(locked));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_lock_repairs_non_object_details() {
        let row = DossierRow {
            details: JsonValue::String("legacy".to_string()),
            ..Default::default()
        };
        let patched = with_lock(row, true);
        assert_eq!(patched.details["locked"], JsonValue::Bool(true));
    }

    #[test]
    fn test_with_lock_preserves_existing_details() {
        let row = DossierRow {
            details: serde_json::json!({ "dateStart": "1960" }),
            ..Default::default()
        };
        let patched = with_lock(row, true);
        assert_eq!(patched.details["dateStart"], "1960");
        assert_eq!(patched.details["locked"], JsonValue::Bool(true));
    }
}
