//! Partner search service: one explicit filter-and-render cycle per request.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{ColumnWarning, MarkerPayload, PartnerRecord, PartnerTable};
use crate::domain::filter::{self, FilterSelection, FilterSpec};
use crate::domain::markers;
use crate::domain::repositories::PartnerRepository;
use crate::error::AppError;

/// Values offered by the facet widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub regions: Vec<String>,
    /// `None` when the table has no services column.
    pub services: Option<Vec<String>>,
}

impl FacetOptions {
    fn from_table(table: &PartnerTable) -> Self {
        Self {
            regions: table.observed_regions().into_iter().collect(),
            services: table
                .observed_services()
                .map(|services| services.into_iter().collect()),
        }
    }
}

/// Result of one search cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// The resolved filter that produced this result.
    pub spec: FilterSpec,
    /// Rows matching the filter, including rows without coordinates.
    pub total: usize,
    /// One pin per matching row with valid coordinates, in source order.
    pub markers: Vec<MarkerPayload>,
    pub warnings: Vec<ColumnWarning>,
    pub facets: FacetOptions,
    /// Positions of the matching rows in the table, in source order.
    pub matched: Vec<usize>,
    #[serde(skip)]
    table: Arc<PartnerTable>,
}

impl SearchOutcome {
    /// Number of matching rows that could be placed on the map.
    pub fn mapped(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The matching rows, in source order.
    pub fn rows(&self) -> impl Iterator<Item = &PartnerRecord> + '_ {
        self.matched.iter().filter_map(|&index| self.table.records.get(index))
    }
}

/// Runs the partner pipeline: load → resolve → filter → build markers.
///
/// Holds no per-request state; every call rebuilds the [`FilterSpec`] from
/// the given selection and reads the shared table.
pub struct PartnerService<R: PartnerRepository> {
    repository: Arc<R>,
}

impl<R: PartnerRepository> PartnerService<R> {
    /// Creates a new partner service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the shared partner table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataUnavailable`] if the source cannot be read.
    pub async fn table(&self) -> Result<Arc<PartnerTable>, AppError> {
        self.repository.load().await
    }

    /// Location of the underlying data source.
    pub fn source(&self) -> String {
        self.repository.source()
    }

    /// Filters the table by `selection` and builds the map markers.
    ///
    /// An empty result is not an error; check [`SearchOutcome::is_empty`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataUnavailable`] if the source cannot be read.
    /// Nothing is produced in that case.
    pub async fn search(&self, selection: &FilterSelection) -> Result<SearchOutcome, AppError> {
        let table = self.repository.load().await?;
        let spec = FilterSpec::resolve(selection, &table);

        let matched = filter::matching_indices(&table, &spec);
        let markers: Vec<MarkerPayload> = matched
            .iter()
            .filter_map(|&index| markers::build(&table.records[index]))
            .collect();

        tracing::debug!(
            total = matched.len(),
            mapped = markers.len(),
            city_query = %spec.city_query,
            "Partner search completed"
        );

        Ok(SearchOutcome {
            total: matched.len(),
            markers,
            warnings: table.column_warnings(),
            facets: FacetOptions::from_table(&table),
            spec,
            matched,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Column, ColumnSet, PartnerRecord};
    use crate::domain::repositories::MockPartnerRepository;
    use serde_json::json;

    fn partner(name: &str, region: &str, city: &str, coords: Option<(f64, f64)>) -> PartnerRecord {
        PartnerRecord {
            name: Some(name.to_string()),
            city: Some(city.to_string()),
            region: Some(region.to_string()),
            contact: Some("(11) 91234-5678".to_string()),
            services: Some("Reparo".to_string()),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
        }
    }

    fn scenario_table() -> PartnerTable {
        PartnerTable::in_memory(vec![
            partner("A", "SP", "Campinas", Some((-22.90, -47.06))),
            partner("B", "RJ", "Niterói", None),
            partner("C", "SP", "São Paulo", Some((-23.55, -46.63))),
        ])
    }

    fn service_with(table: PartnerTable) -> PartnerService<MockPartnerRepository> {
        let table = Arc::new(table);
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo
            .expect_load()
            .returning(move || Ok(Arc::clone(&table)));
        PartnerService::new(Arc::new(mock_repo))
    }

    #[tokio::test]
    async fn test_search_region_scenario() {
        let service = service_with(scenario_table());

        let selection = FilterSelection {
            regions: Some(vec!["SP".to_string()]),
            city: Some(String::new()),
            services: None,
        };
        let outcome = service.search(&selection).await.unwrap();

        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.mapped(), 2);
        assert_eq!(outcome.markers[0].tooltip_text, "A");
        assert_eq!(outcome.markers[1].tooltip_text, "C");
    }

    #[tokio::test]
    async fn test_unlocated_rows_count_toward_total() {
        let service = service_with(scenario_table());

        let outcome = service.search(&FilterSelection::default()).await.unwrap();

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.mapped(), 2);
        assert!(!outcome.is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let service = service_with(scenario_table());

        let selection = FilterSelection {
            city: Some("Manaus".to_string()),
            ..Default::default()
        };
        let outcome = service.search(&selection).await.unwrap();

        assert!(outcome.is_empty());
        assert!(outcome.markers.is_empty());
        assert_eq!(outcome.facets.regions, vec!["RJ", "SP"]);
    }

    #[tokio::test]
    async fn test_warnings_for_missing_columns() {
        let columns: ColumnSet = [
            Column::Name,
            Column::City,
            Column::Contact,
            Column::Latitude,
            Column::Longitude,
        ]
        .into_iter()
        .collect();
        let table = PartnerTable::new(scenario_table().records, columns, "test.csv");
        let service = service_with(table);

        let selection = FilterSelection {
            regions: Some(vec![]),
            ..Default::default()
        };
        let outcome = service.search(&selection).await.unwrap();

        // Region facet is disabled, so the empty selection filters nothing.
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.facets.services.is_none());
        assert!(outcome.spec.services.is_none());
    }

    #[tokio::test]
    async fn test_data_unavailable_propagates() {
        let mut mock_repo = MockPartnerRepository::new();
        mock_repo
            .expect_load()
            .times(1)
            .returning(|| Err(AppError::data_unavailable("missing", json!({}))));

        let service = PartnerService::new(Arc::new(mock_repo));
        let result = service.search(&FilterSelection::default()).await;

        assert!(matches!(result, Err(AppError::DataUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_outcome_rows_follow_the_filter() {
        let service = service_with(scenario_table());

        let selection = FilterSelection {
            regions: Some(vec!["RJ".to_string(), "SP".to_string()]),
            city: Some("i".to_string()),
            services: None,
        };
        let outcome = service.search(&selection).await.unwrap();

        let names: Vec<_> = outcome.rows().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(outcome.matched, vec![0, 1]);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.mapped(), 1);
    }

    #[tokio::test]
    async fn test_blank_services_column_keeps_default_view() {
        let mut rows = scenario_table().records;
        for row in &mut rows {
            row.services = None;
        }
        let service = service_with(PartnerTable::in_memory(rows));

        let outcome = service.search(&FilterSelection::default()).await.unwrap();

        assert_eq!(outcome.total, 3);
        assert!(outcome.facets.services.is_none());
        assert!(outcome.spec.services.is_none());
    }

    #[tokio::test]
    async fn test_search_is_repeatable() {
        let service = service_with(scenario_table());
        let selection = FilterSelection {
            city: Some("a".to_string()),
            ..Default::default()
        };

        let first = service.search(&selection).await.unwrap();
        let second = service.search(&selection).await.unwrap();

        assert_eq!(first.total, second.total);
        assert_eq!(first.markers, second.markers);
    }
}
