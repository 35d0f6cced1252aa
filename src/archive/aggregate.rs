//! Sector aggregator
//!
//! Re-derives the hierarchical "who held which position in which sector"
//! index from the flat profile list: sector → category name → ordered list
//! of (assignment, owning profile) pairs.
//!
//! Ordering is discovery order throughout: categories arrive from the store
//! already sorted (sector, then name) at fetch time, and this pass preserves
//! that instead of re-sorting. The grouping is derived and ephemeral: it is
//! computed once per snapshot build and never persisted.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::model::{ArchiveAssignment, Profile, SectorTag};

/// One placement of a profile inside a category: the assignment that put it
/// there plus the owning profile
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub assignment: ArchiveAssignment,
    pub profile: Arc<Profile>,
}

/// Nested grouping: sector → category name → placements in discovery order.
///
/// Every known sector has a bucket, possibly empty. A profile with
/// assignments across several sectors appears independently in each relevant
/// bucket; an assignment whose category lookup failed appears in none (it
/// stays visible in the profile's own assignment list).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SectorGrouping {
    buckets: IndexMap<SectorTag, IndexMap<String, Vec<Placement>>>,
}

impl SectorGrouping {
    /// Categories and placements for one sector
    pub fn sector(&self, tag: SectorTag) -> Option<&IndexMap<String, Vec<Placement>>> {
        self.buckets.get(&tag)
    }

    /// Iterate sectors in display order
    pub fn iter(&self) -> impl Iterator<Item = (SectorTag, &IndexMap<String, Vec<Placement>>)> {
        self.buckets.iter().map(|(tag, categories)| (*tag, categories))
    }

    /// Total number of placements across all sectors
    pub fn placement_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|categories| categories.values())
            .map(Vec::len)
            .sum()
    }
}

/// Derive the sector grouping from the normalized profile set.
///
/// Never fails: profiles without assignments contribute nothing; assignments
/// without a resolved category are skipped; sectors this build does not know
/// are skipped rather than crashing (the store may grow the set first).
pub fn aggregate(profiles: &[Arc<Profile>]) -> SectorGrouping {
    let mut buckets: IndexMap<SectorTag, IndexMap<String, Vec<Placement>>> = SectorTag::KNOWN
        .iter()
        .map(|tag| (*tag, IndexMap::new()))
        .collect();

    for profile in profiles {
        for assignment in &profile.assignments {
            let Some(category) = &assignment.category else {
                continue;
            };

            let Some(bucket) = buckets.get_mut(&category.sector) else {
                debug!(
                    sector = %category.sector,
                    category = %category.name,
                    "skipping assignment in sector unknown to this build"
                );
                continue;
            };

            bucket
                .entry(category.name.clone())
                .or_default()
                .push(Placement {
                    assignment: assignment.clone(),
                    profile: Arc::clone(profile),
                });
        }
    }

    SectorGrouping { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::join::join_assignments;
    use crate::archive::normalize::normalize;
    use crate::locale::Locale;
    use crate::model::ArchiveCategory;
    use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};

    fn profile_with(id: &str, assignments: Vec<ArchiveAssignment>) -> Arc<Profile> {
        let row = DossierRow {
            id: Some(id.to_string()),
            full_name: format!("Profile {}", id),
            ..Default::default()
        };
        Arc::new(normalize(&row, Locale::En, assignments))
    }

    fn enriched(id: i64, profile_id: &str, category: Option<ArchiveCategory>) -> ArchiveAssignment {
        ArchiveAssignment {
            id,
            user_id: profile_id.to_string(),
            category_id: category.as_ref().map(|c| c.id).unwrap_or(0),
            start_date: String::new(),
            end_date: None,
            title_note: String::new(),
            category,
        }
    }

    fn banks() -> ArchiveCategory {
        ArchiveCategory {
            id: 1,
            name: "Banks".to_string(),
            sector: SectorTag::Business,
        }
    }

    #[test]
    fn test_every_known_sector_has_a_bucket() {
        let grouping = aggregate(&[]);
        for tag in SectorTag::KNOWN {
            assert!(grouping.sector(tag).unwrap().is_empty());
        }
        assert!(grouping.sector(SectorTag::Unknown).is_none());
    }

    #[test]
    fn test_banks_scenario_end_to_end() {
        // The full pipeline: raw rows → join → normalize → aggregate
        let categories = vec![CategoryRow {
            id: Some(1),
            category_name: "Banks".to_string(),
            section_type: "BUSINESS".to_string(),
        }];
        let assignments = vec![AssignmentRow {
            id: Some(9),
            user_id: Some("p1".to_string()),
            category_id: Some(1),
            title_note: Some("CEO".to_string()),
            ..Default::default()
        }];

        let mut buckets = join_assignments(&assignments, &categories);
        let p1 = profile_with("p1", buckets.remove("p1").unwrap());
        assert_eq!(p1.assignments.len(), 1);
        assert_eq!(p1.assignments[0].title_note, "CEO");

        let grouping = aggregate(&[Arc::clone(&p1)]);
        let business = grouping.sector(SectorTag::Business).unwrap();
        assert_eq!(business.len(), 1);

        let placements = &business["Banks"];
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].assignment.id, 9);
        assert_eq!(placements[0].profile.id, "p1");

        for tag in SectorTag::KNOWN {
            if tag != SectorTag::Business {
                assert!(grouping.sector(tag).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_unresolved_category_is_excluded_but_stays_on_profile() {
        let p1 = profile_with("p1", vec![enriched(7, "p1", None)]);
        let grouping = aggregate(&[Arc::clone(&p1)]);

        assert_eq!(grouping.placement_count(), 0);
        assert_eq!(p1.assignments.len(), 1);
    }

    #[test]
    fn test_unknown_sector_is_skipped() {
        let future = ArchiveCategory {
            id: 3,
            name: "Diaspora Media".to_string(),
            sector: SectorTag::Unknown,
        };
        let p1 = profile_with("p1", vec![enriched(7, "p1", Some(future))]);

        let grouping = aggregate(&[p1]);
        assert_eq!(grouping.placement_count(), 0);
    }

    #[test]
    fn test_profile_appears_in_each_relevant_bucket() {
        let courts = ArchiveCategory {
            id: 2,
            name: "Courts".to_string(),
            sector: SectorTag::Judiciary,
        };
        let p1 = profile_with(
            "p1",
            vec![
                enriched(1, "p1", Some(banks())),
                enriched(2, "p1", Some(courts)),
            ],
        );

        let grouping = aggregate(&[p1]);
        assert_eq!(grouping.sector(SectorTag::Business).unwrap()["Banks"].len(), 1);
        assert_eq!(grouping.sector(SectorTag::Judiciary).unwrap()["Courts"].len(), 1);
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let airlines = ArchiveCategory {
            id: 4,
            name: "Airlines".to_string(),
            sector: SectorTag::Business,
        };
        // Banks discovered before Airlines via input order even though
        // "Airlines" sorts first alphabetically
        let p1 = profile_with("p1", vec![enriched(1, "p1", Some(banks()))]);
        let p2 = profile_with("p2", vec![enriched(2, "p2", Some(airlines))]);

        let grouping = aggregate(&[p1, p2]);
        let names: Vec<&String> = grouping.sector(SectorTag::Business).unwrap().keys().collect();
        assert_eq!(names, vec!["Banks", "Airlines"]);
    }

    #[test]
    fn test_locked_profile_still_grouped() {
        let row = DossierRow {
            id: Some("p1".to_string()),
            details: serde_json::json!({ "locked": true }),
            ..Default::default()
        };
        let profile = Arc::new(normalize(&row, Locale::En, vec![enriched(1, "p1", Some(banks()))]));
        assert!(profile.locked);

        let grouping = aggregate(&[profile]);
        assert_eq!(grouping.placement_count(), 1);
    }
}
