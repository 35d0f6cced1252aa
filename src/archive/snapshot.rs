//! Immutable archive snapshots
//!
//! Every full reload produces one `ArchiveSnapshot`: the normalized profile
//! set, the derived sector grouping, and the auxiliary tables, stamped with a
//! recompute epoch. Snapshots are never mutated: a rebuild swaps in a new
//! value wholesale, which removes the partial-update class of bugs outright.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::archive::aggregate::SectorGrouping;
use crate::locale::Locale;
use crate::model::{Partner, Profile, SectorMeta};

/// One immutable reconciliation result
#[derive(Debug, Clone)]
pub struct ArchiveSnapshot {
    /// Monotonic recompute counter; bumped on every rebuild
    pub epoch: u64,
    /// Locale the biographies and labels were resolved for
    pub locale: Locale,
    /// Flat normalized profile list, store order
    pub profiles: Vec<Arc<Profile>>,
    /// Derived sector → category → placements index
    pub grouping: SectorGrouping,
    /// Sector homepage metadata
    pub sectors: Vec<SectorMeta>,
    /// Partner organizations
    pub partners: Vec<Partner>,
}

impl ArchiveSnapshot {
    /// The pre-first-fetch snapshot
    pub fn empty(locale: Locale) -> Self {
        Self {
            epoch: 0,
            locale,
            profiles: Vec::new(),
            grouping: SectorGrouping::default(),
            sectors: Vec::new(),
            partners: Vec::new(),
        }
    }

    /// Find a profile by id
    pub fn profile(&self, id: &str) -> Option<&Arc<Profile>> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over name, category key, and the
    /// locale-resolved display label
    pub fn search(&self, query: &str) -> Vec<Arc<Profile>> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return self.profiles.clone();
        }
        self.profiles
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.category_label.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

/// Shared slot holding the current snapshot.
///
/// Readers clone an `Arc` out and keep using the epoch they started with;
/// writers swap the whole snapshot after a rebuild.
pub struct SnapshotStore {
    current: RwLock<Arc<ArchiveSnapshot>>,
}

impl SnapshotStore {
    /// Create a store holding an empty snapshot
    pub fn new(locale: Locale) -> Self {
        Self {
            current: RwLock::new(Arc::new(ArchiveSnapshot::empty(locale))),
        }
    }

    /// The current snapshot
    pub async fn load(&self) -> Arc<ArchiveSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Replace the current snapshot
    pub async fn swap(&self, snapshot: Arc<ArchiveSnapshot>) {
        *self.current.write().await = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::normalize::normalize;
    use crate::store::rows::DossierRow;

    fn snapshot_with_profiles(rows: Vec<DossierRow>) -> ArchiveSnapshot {
        let profiles = rows
            .iter()
            .map(|row| Arc::new(normalize(row, Locale::So, Vec::new())))
            .collect();
        ArchiveSnapshot {
            profiles,
            ..ArchiveSnapshot::empty(Locale::So)
        }
    }

    fn row(id: &str, name: &str, category: &str) -> DossierRow {
        DossierRow {
            id: Some(id.to_string()),
            full_name: name.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let snapshot = snapshot_with_profiles(vec![
            row("p1", "Amina Warsame", "Politics"),
            row("p2", "Hassan Ali", "Business"),
        ]);
        let hits = snapshot.search("amina");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
    }

    #[test]
    fn test_search_matches_localized_category_label() {
        let snapshot = snapshot_with_profiles(vec![row("p1", "Hassan Ali", "Business")]);
        // Somali snapshot: "Business" displays as "Ganacsiga"
        assert_eq!(snapshot.search("ganacsiga").len(), 1);
        assert_eq!(snapshot.search("business").len(), 1);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let snapshot = snapshot_with_profiles(vec![
            row("p1", "A", "Politics"),
            row("p2", "B", "Business"),
        ]);
        assert_eq!(snapshot.search("").len(), 2);
    }

    #[tokio::test]
    async fn test_store_swaps_wholesale() {
        let store = SnapshotStore::new(Locale::En);
        assert_eq!(store.load().await.epoch, 0);

        let next = ArchiveSnapshot {
            epoch: 1,
            ..ArchiveSnapshot::empty(Locale::En)
        };
        store.swap(Arc::new(next)).await;
        assert_eq!(store.load().await.epoch, 1);
    }
}
