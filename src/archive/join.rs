//! Assignment joiner
//!
//! Joins flat assignment rows against category rows and buckets the enriched
//! result per owning profile. Malformed rows are dropped individually; one
//! bad join row must never blank out every profile's assignment list.

use std::collections::HashMap;

use tracing::warn;

use crate::model::{ArchiveAssignment, ArchiveCategory, SectorTag};
use crate::store::rows::{AssignmentRow, CategoryRow};

/// Build category records from raw rows, keyed by id.
///
/// Rows without an id cannot be referenced by any assignment and are skipped.
fn category_index(rows: &[CategoryRow]) -> HashMap<i64, ArchiveCategory> {
    rows.iter()
        .filter_map(|row| {
            let id = row.id?;
            Some((
                id,
                ArchiveCategory {
                    id,
                    name: row.category_name.clone(),
                    sector: SectorTag::parse(&row.section_type),
                },
            ))
        })
        .collect()
}

/// Join assignment rows to their categories, bucketed by owning profile id.
///
/// Bucket order is input order, created on first sight. The attached
/// `category` is legitimately `None` when the referenced category no longer
/// exists; rows missing their owning profile id are dropped with a warning.
pub fn join_assignments(
    assignments: &[AssignmentRow],
    categories: &[CategoryRow],
) -> HashMap<String, Vec<ArchiveAssignment>> {
    let index = category_index(categories);
    let mut buckets: HashMap<String, Vec<ArchiveAssignment>> = HashMap::new();

    for row in assignments {
        let Some(profile_id) = row.user_id.as_deref().filter(|id| !id.is_empty()) else {
            warn!(assignment_id = ?row.id, "dropping assignment row without owning profile id");
            continue;
        };

        let category_id = row.category_id.unwrap_or(0);
        let enriched = ArchiveAssignment {
            id: row.id.unwrap_or(0),
            user_id: profile_id.to_string(),
            category_id,
            start_date: row.start_date.clone().unwrap_or_default(),
            // Empty end dates mean the same as absent ones: still ongoing
            end_date: row.end_date.clone().filter(|s| !s.is_empty()),
            title_note: row.title_note.clone().unwrap_or_default(),
            category: index.get(&category_id).cloned(),
        };

        buckets.entry(profile_id.to_string()).or_default().push(enriched);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, sector: &str) -> CategoryRow {
        CategoryRow {
            id: Some(id),
            category_name: name.to_string(),
            section_type: sector.to_string(),
        }
    }

    fn assignment(id: i64, user: Option<&str>, category_id: i64) -> AssignmentRow {
        AssignmentRow {
            id: Some(id),
            user_id: user.map(str::to_string),
            category_id: Some(category_id),
            start_date: None,
            end_date: None,
            title_note: None,
        }
    }

    #[test]
    fn test_join_attaches_category_and_defaults_dates() {
        let categories = vec![category(1, "Banks", "BUSINESS")];
        let assignments = vec![AssignmentRow {
            id: Some(9),
            user_id: Some("p1".to_string()),
            category_id: Some(1),
            title_note: Some("CEO".to_string()),
            ..Default::default()
        }];

        let buckets = join_assignments(&assignments, &categories);
        let list = &buckets["p1"];
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 9);
        assert_eq!(list[0].title_note, "CEO");
        assert_eq!(list[0].start_date, "");
        assert_eq!(list[0].end_date, None);

        let joined = list[0].category.as_ref().unwrap();
        assert_eq!(joined.id, 1);
        assert_eq!(joined.name, "Banks");
        assert_eq!(joined.sector, SectorTag::Business);
    }

    #[test]
    fn test_row_without_owner_is_dropped_without_affecting_others() {
        let categories = vec![category(1, "Banks", "BUSINESS")];
        let assignments = vec![
            assignment(1, None, 1),
            assignment(2, Some("p1"), 1),
            assignment(3, Some(""), 1),
        ];

        let buckets = join_assignments(&assignments, &categories);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets["p1"].len(), 1);
        assert_eq!(buckets["p1"][0].id, 2);
    }

    #[test]
    fn test_dangling_category_joins_as_none() {
        let buckets = join_assignments(&[assignment(5, Some("p1"), 42)], &[]);
        assert_eq!(buckets["p1"].len(), 1);
        assert!(buckets["p1"][0].category.is_none());
    }

    #[test]
    fn test_bucket_order_is_input_order() {
        let categories = vec![category(1, "Banks", "BUSINESS"), category(2, "Courts", "JUDICIARY")];
        let assignments = vec![
            assignment(10, Some("p1"), 2),
            assignment(11, Some("p1"), 1),
            assignment(12, Some("p1"), 2),
        ];

        let buckets = join_assignments(&assignments, &categories);
        let ids: Vec<i64> = buckets["p1"].iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_category_without_id_is_unreferencable() {
        let categories = vec![CategoryRow {
            id: None,
            category_name: "Ghost".to_string(),
            section_type: "BUSINESS".to_string(),
        }];
        let buckets = join_assignments(&[assignment(1, Some("p1"), 0)], &categories);
        assert!(buckets["p1"][0].category.is_none());
    }
}
