//! Filter engine: selects partner rows matching every active facet.
//!
//! Facets are combined with logical AND:
//!
//! 1. **Region** - exact, case-sensitive set membership
//! 2. **City** - case-insensitive substring search (accents are significant)
//! 3. **Services** - exact set membership, only when the facet is in use
//!
//! An empty region or service selection lets no rows through. A facet whose
//! column is absent, or whose cells are all blank, is disabled and never
//! filters.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::entities::{Column, PartnerRecord, PartnerTable};

/// Raw facet selection as submitted by a user.
///
/// `None` means the user never touched the facet; it resolves to every value
/// observed in the table. `Some(vec![])` is an explicit empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: Option<Vec<String>>,
    pub city: Option<String>,
    pub services: Option<Vec<String>>,
}

/// Fully resolved filter for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub regions: BTreeSet<String>,
    pub city_query: String,
    /// `None` when the services facet is not offered for this table.
    pub services: Option<BTreeSet<String>>,
}

impl FilterSpec {
    /// Resolves a user selection against the table.
    ///
    /// Unset facets default to all observed values, mirroring a multi-select
    /// widget that starts fully selected.
    pub fn resolve(selection: &FilterSelection, table: &PartnerTable) -> Self {
        let regions = match &selection.regions {
            Some(values) => values.iter().cloned().collect(),
            None => table.observed_regions(),
        };

        let services = table
            .observed_services()
            .map(|observed| match &selection.services {
                Some(values) => values.iter().cloned().collect(),
                None => observed,
            });

        Self {
            regions,
            city_query: selection.city.clone().unwrap_or_default(),
            services,
        }
    }

    /// Selects every observed value and clears the city search.
    pub fn all(table: &PartnerTable) -> Self {
        Self::resolve(&FilterSelection::default(), table)
    }
}

/// Returns the rows of `table` matching `spec`, in source order.
///
/// Pure function of its inputs: the same table and spec always produce the
/// same rows.
pub fn apply<'a>(table: &'a PartnerTable, spec: &FilterSpec) -> Vec<&'a PartnerRecord> {
    let predicate = Predicate::new(table, spec);
    table
        .records
        .iter()
        .filter(|row| predicate.matches(row))
        .collect()
}

/// Positions in `table.records` of the rows [`apply`] would return.
pub fn matching_indices(table: &PartnerTable, spec: &FilterSpec) -> Vec<usize> {
    let predicate = Predicate::new(table, spec);
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, row)| predicate.matches(row))
        .map(|(index, _)| index)
        .collect()
}

/// The active facets of one spec against one table.
struct Predicate<'s> {
    regions: Option<&'s BTreeSet<String>>,
    city_query: Option<String>,
    services: Option<&'s BTreeSet<String>>,
}

impl<'s> Predicate<'s> {
    fn new(table: &PartnerTable, spec: &'s FilterSpec) -> Self {
        Self {
            regions: table
                .offers_facet(Column::Region)
                .then_some(&spec.regions),
            city_query: normalized_query(&spec.city_query)
                .filter(|_| table.has_column(Column::City)),
            services: spec
                .services
                .as_ref()
                .filter(|_| table.offers_facet(Column::Services)),
        }
    }

    fn matches(&self, row: &PartnerRecord) -> bool {
        self.regions
            .is_none_or(|set| matches_set(row.region.as_deref(), set))
            && self
                .city_query
                .as_deref()
                .is_none_or(|query| matches_city(row.city.as_deref(), query))
            && self
                .services
                .is_none_or(|set| matches_set(row.services.as_deref(), set))
    }
}

fn matches_set(value: Option<&str>, selected: &BTreeSet<String>) -> bool {
    value.is_some_and(|v| selected.contains(v))
}

/// Lowercased, trimmed query; `None` when there is nothing to search for.
fn normalized_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn matches_city(city: Option<&str>, lowered_query: &str) -> bool {
    city.is_some_and(|c| c.to_lowercase().contains(lowered_query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ColumnSet;

    fn row(name: &str, region: &str, city: &str, services: &str) -> PartnerRecord {
        PartnerRecord {
            name: Some(name.to_string()),
            region: Some(region.to_string()).filter(|s| !s.is_empty()),
            city: Some(city.to_string()).filter(|s| !s.is_empty()),
            services: Some(services.to_string()).filter(|s| !s.is_empty()),
            ..Default::default()
        }
    }

    fn sample_table() -> PartnerTable {
        PartnerTable::in_memory(vec![
            row("A", "SP", "Campinas", "Reparo"),
            row("B", "RJ", "Niterói", "Peças"),
            row("C", "SP", "São Paulo", "Reparo, Peças"),
            row("D", "MG", "Belo Horizonte", "Reparo"),
            row("E", "SP", "", "Reparo"),
        ])
    }

    fn names(rows: &[&PartnerRecord]) -> Vec<String> {
        rows.iter().filter_map(|r| r.name.clone()).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_region_filter() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["SP"]),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["A", "C", "E"]);
    }

    #[test]
    fn test_empty_region_selection_matches_nothing() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: BTreeSet::new(),
            ..FilterSpec::all(&table)
        };
        assert!(apply(&table, &spec).is_empty());
    }

    #[test]
    fn test_region_comparison_is_case_sensitive() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["sp"]),
            ..FilterSpec::all(&table)
        };
        assert!(apply(&table, &spec).is_empty());
    }

    #[test]
    fn test_city_search_is_case_insensitive() {
        let table = sample_table();
        let spec = FilterSpec {
            city_query: "CAMP".to_string(),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["A"]);

        let spec = FilterSpec {
            city_query: "niterói".to_string(),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["B"]);
    }

    #[test]
    fn test_city_search_accents_are_significant() {
        let table = sample_table();
        let spec = FilterSpec {
            city_query: "sao paulo".to_string(),
            ..FilterSpec::all(&table)
        };
        assert!(apply(&table, &spec).is_empty());

        let spec = FilterSpec {
            city_query: "são paulo".to_string(),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["C"]);
    }

    #[test]
    fn test_missing_city_never_matches_query() {
        let table = sample_table();
        let spec = FilterSpec {
            city_query: "a".to_string(),
            ..FilterSpec::all(&table)
        };
        assert!(!names(&apply(&table, &spec)).contains(&"E".to_string()));
    }

    #[test]
    fn test_blank_city_query_matches_all() {
        let table = sample_table();
        let spec = FilterSpec {
            city_query: "   ".to_string(),
            ..FilterSpec::all(&table)
        };
        assert_eq!(apply(&table, &spec).len(), 5);
    }

    #[test]
    fn test_service_filter_matches_whole_value() {
        let table = sample_table();
        let spec = FilterSpec {
            services: Some(set(&["Peças"])),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["B"]);
    }

    #[test]
    fn test_service_facet_not_in_use() {
        let table = sample_table();
        let spec = FilterSpec {
            services: None,
            ..FilterSpec::all(&table)
        };
        assert_eq!(apply(&table, &spec).len(), 5);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["SP", "MG"]),
            city_query: "o".to_string(),
            services: Some(set(&["Reparo"])),
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["D"]);
    }

    #[test]
    fn test_missing_region_column_disables_facet() {
        let columns: ColumnSet = [Column::Name, Column::City].into_iter().collect();
        let table = PartnerTable::new(sample_table().records, columns, "test.csv");
        let spec = FilterSpec {
            regions: BTreeSet::new(),
            city_query: String::new(),
            services: Some(BTreeSet::new()),
        };
        assert_eq!(apply(&table, &spec).len(), 5);
    }

    #[test]
    fn test_missing_city_column_disables_search() {
        let columns: ColumnSet = [Column::Name, Column::Region].into_iter().collect();
        let table = PartnerTable::new(sample_table().records, columns, "test.csv");
        let spec = FilterSpec {
            city_query: "zzz".to_string(),
            ..FilterSpec::all(&table)
        };
        assert_eq!(apply(&table, &spec).len(), 5);
    }

    #[test]
    fn test_blank_facet_columns_do_not_filter() {
        let table = PartnerTable::in_memory(vec![
            row("A", "", "Campinas", ""),
            row("B", "", "Rio de Janeiro", ""),
        ]);

        let spec = FilterSpec::all(&table);
        assert!(spec.services.is_none());
        assert_eq!(names(&apply(&table, &spec)), vec!["A", "B"]);

        let selection = FilterSelection {
            regions: Some(vec![]),
            city: None,
            services: Some(vec![]),
        };
        let spec = FilterSpec::resolve(&selection, &table);
        assert_eq!(apply(&table, &spec).len(), 2);
    }

    #[test]
    fn test_explicit_empty_selection_still_applies_to_offered_facet() {
        let table = PartnerTable::in_memory(vec![
            row("A", "SP", "Campinas", ""),
            row("B", "RJ", "Rio de Janeiro", ""),
        ]);
        let selection = FilterSelection {
            regions: Some(vec![]),
            city: None,
            services: Some(vec![]),
        };
        let spec = FilterSpec::resolve(&selection, &table);
        assert!(apply(&table, &spec).is_empty());
    }

    #[test]
    fn test_matching_indices_agree_with_apply() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["SP"]),
            ..FilterSpec::all(&table)
        };
        let indices = matching_indices(&table, &spec);
        assert_eq!(indices, vec![0, 2, 4]);

        let rows: Vec<&PartnerRecord> = indices.iter().map(|&i| &table.records[i]).collect();
        assert_eq!(rows, apply(&table, &spec));
    }

    #[test]
    fn test_empty_table() {
        let table = PartnerTable::in_memory(vec![]);
        let spec = FilterSpec::all(&table);
        assert!(apply(&table, &spec).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["SP", "RJ"]),
            city_query: "i".to_string(),
            services: None,
        };
        assert_eq!(apply(&table, &spec), apply(&table, &spec));
    }

    #[test]
    fn test_apply_preserves_source_order() {
        let table = sample_table();
        let spec = FilterSpec {
            regions: set(&["MG", "SP", "RJ"]),
            ..FilterSpec::all(&table)
        };
        assert_eq!(names(&apply(&table, &spec)), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_widening_never_shrinks_result() {
        let table = sample_table();
        let narrow = FilterSpec {
            regions: set(&["SP"]),
            city_query: "campinas".to_string(),
            services: Some(set(&["Reparo"])),
        };
        let base = apply(&table, &narrow).len();

        let mut wider_region = narrow.clone();
        wider_region.regions.insert("RJ".to_string());
        assert!(apply(&table, &wider_region).len() >= base);

        let cleared_city = FilterSpec {
            city_query: String::new(),
            ..narrow.clone()
        };
        assert!(apply(&table, &cleared_city).len() >= base);

        let mut wider_services = narrow.clone();
        if let Some(services) = wider_services.services.as_mut() {
            services.insert("Peças".to_string());
        }
        assert!(apply(&table, &wider_services).len() >= base);
    }

    #[test]
    fn test_resolve_defaults_to_observed_values() {
        let table = sample_table();
        let spec = FilterSpec::resolve(&FilterSelection::default(), &table);
        assert_eq!(spec.regions, set(&["MG", "RJ", "SP"]));
        assert_eq!(
            spec.services,
            Some(set(&["Peças", "Reparo", "Reparo, Peças"]))
        );
        assert!(spec.city_query.is_empty());
    }

    #[test]
    fn test_resolve_keeps_explicit_empty_selection() {
        let table = sample_table();
        let selection = FilterSelection {
            regions: Some(vec![]),
            city: Some("Camp".to_string()),
            services: Some(vec![]),
        };
        let spec = FilterSpec::resolve(&selection, &table);
        assert!(spec.regions.is_empty());
        assert_eq!(spec.services, Some(BTreeSet::new()));
        assert_eq!(spec.city_query, "Camp");
    }

    #[test]
    fn test_resolve_without_services_column() {
        let columns: ColumnSet = [Column::Name, Column::Region, Column::City]
            .into_iter()
            .collect();
        let table = PartnerTable::new(sample_table().records, columns, "test.csv");
        let selection = FilterSelection {
            services: Some(vec!["Reparo".to_string()]),
            ..Default::default()
        };
        assert!(FilterSpec::resolve(&selection, &table).services.is_none());
    }
}
