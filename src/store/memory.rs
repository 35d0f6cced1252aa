//! In-memory repository gateway
//!
//! DashMap-backed tables with the same observable behavior as the hosted
//! store: minted ids, replace-semantics assignment writes, and fetch-time
//! category ordering. Serves dev mode (no hosted store configured) and the
//! integration tests.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

use crate::model::{Partner, SectorMeta};
use crate::store::gateway::RepositoryGateway;
use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};
use crate::types::{DiiwaanError, Result};

/// In-memory record store with concurrent access
#[derive(Default)]
pub struct MemoryGateway {
    dossiers: DashMap<String, DossierRow>,
    categories: DashMap<i64, CategoryRow>,
    assignments: DashMap<i64, AssignmentRow>,
    partners: DashMap<String, Partner>,
    sector_meta: DashMap<String, SectorMeta>,
    next_category_id: AtomicI64,
    next_assignment_id: AtomicI64,
}

impl MemoryGateway {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            next_category_id: AtomicI64::new(1),
            next_assignment_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    fn mint_category_id(&self) -> i64 {
        self.next_category_id.fetch_add(1, Ordering::Relaxed)
    }

    fn mint_assignment_id(&self) -> i64 {
        self.next_assignment_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl RepositoryGateway for MemoryGateway {
    async fn fetch_dossiers(&self) -> Result<Vec<DossierRow>> {
        let mut rows: Vec<DossierRow> = self.dossiers.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryRow>> {
        let mut rows: Vec<CategoryRow> =
            self.categories.iter().map(|e| e.value().clone()).collect();
        // Same ordering the hosted store applies at fetch time
        rows.sort_by(|a, b| {
            (a.section_type.as_str(), a.category_name.as_str())
                .cmp(&(b.section_type.as_str(), b.category_name.as_str()))
        });
        Ok(rows)
    }

    async fn fetch_assignments(&self) -> Result<Vec<AssignmentRow>> {
        let mut rows: Vec<AssignmentRow> =
            self.assignments.iter().map(|e| e.value().clone()).collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn fetch_partners(&self) -> Result<Vec<Partner>> {
        let mut rows: Vec<Partner> = self.partners.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn fetch_sector_meta(&self) -> Result<Vec<SectorMeta>> {
        let mut rows: Vec<SectorMeta> =
            self.sector_meta.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn upsert_dossier(&self, mut row: DossierRow) -> Result<String> {
        let id = match row.id.as_deref().filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        row.id = Some(id.clone());
        self.dossiers.insert(id.clone(), row);
        Ok(id)
    }

    async fn delete_dossier(&self, id: &str) -> Result<()> {
        self.dossiers
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DiiwaanError::NotFound(format!("dossier {}", id)))
    }

    async fn upsert_assignments(&self, profile_id: &str, rows: Vec<AssignmentRow>) -> Result<()> {
        // Replace semantics: drop the profile's current rows, then insert
        let stale: Vec<i64> = self
            .assignments
            .iter()
            .filter(|e| e.value().user_id.as_deref() == Some(profile_id))
            .map(|e| *e.key())
            .collect();
        for id in stale {
            self.assignments.remove(&id);
        }

        for mut row in rows {
            let id = row.id.unwrap_or_else(|| self.mint_assignment_id());
            row.id = Some(id);
            row.user_id = Some(profile_id.to_string());
            self.assignments.insert(id, row);
        }
        Ok(())
    }

    async fn upsert_category(&self, mut row: CategoryRow) -> Result<i64> {
        let id = row.id.unwrap_or_else(|| self.mint_category_id());
        row.id = Some(id);
        self.categories.insert(id, row);
        Ok(id)
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.categories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DiiwaanError::NotFound(format!("category {}", id)))
    }

    async fn upsert_partner(&self, mut partner: Partner) -> Result<String> {
        if partner.id.is_empty() {
            partner.id = Uuid::new_v4().to_string();
        }
        let id = partner.id.clone();
        self.partners.insert(id.clone(), partner);
        Ok(id)
    }

    async fn delete_partner(&self, id: &str) -> Result<()> {
        self.partners
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DiiwaanError::NotFound(format!("partner {}", id)))
    }

    async fn upsert_sector_meta(&self, meta: SectorMeta) -> Result<()> {
        self.sector_meta.insert(meta.id.clone(), meta);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_dossier_mints_id_when_absent() {
        let store = MemoryGateway::new();
        let id = store.upsert_dossier(DossierRow::default()).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.fetch_dossiers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_categories_ordered_by_sector_then_name() {
        let store = MemoryGateway::new();
        for (name, sector) in [
            ("Banks", "BUSINESS"),
            ("Airlines", "BUSINESS"),
            ("Courts", "JUDICIARY"),
        ] {
            store
                .upsert_category(CategoryRow {
                    id: None,
                    category_name: name.to_string(),
                    section_type: sector.to_string(),
                })
                .await
                .unwrap();
        }

        let fetched = store.fetch_categories().await.unwrap();
        let names: Vec<&str> = fetched.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Airlines", "Banks", "Courts"]);
    }

    #[tokio::test]
    async fn test_upsert_assignments_replaces_existing_rows() {
        let store = MemoryGateway::new();
        let row = |note: &str| AssignmentRow {
            title_note: Some(note.to_string()),
            ..Default::default()
        };

        store
            .upsert_assignments("p1", vec![row("Chairman"), row("Founder")])
            .await
            .unwrap();
        store.upsert_assignments("p1", vec![row("CEO")]).await.unwrap();
        store.upsert_assignments("p2", vec![row("Judge")]).await.unwrap();

        let all = store.fetch_assignments().await.unwrap();
        assert_eq!(all.len(), 2);
        let p1: Vec<_> = all
            .iter()
            .filter(|r| r.user_id.as_deref() == Some("p1"))
            .collect();
        assert_eq!(p1.len(), 1);
        assert_eq!(p1[0].title_note.as_deref(), Some("CEO"));
    }
}
