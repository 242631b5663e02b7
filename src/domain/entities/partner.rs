//! Partner record and the immutable table loaded from the source file.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::marker::Coordinates;

/// A known column of the source table.
///
/// Header names are an exact-match contract with the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    City,
    Region,
    Contact,
    Services,
    Latitude,
    Longitude,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Name,
        Column::City,
        Column::Region,
        Column::Contact,
        Column::Services,
        Column::Latitude,
        Column::Longitude,
    ];

    /// Header text expected in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Nome",
            Column::City => "Cidade",
            Column::Region => "Estado",
            Column::Contact => "Contato",
            Column::Services => "Serviços",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
        }
    }

    /// Matches a header cell, ignoring surrounding whitespace only.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == header)
    }

    /// What stops working when this column is absent.
    fn degraded_feature(self) -> &'static str {
        match self {
            Column::Name => "names shown as placeholders",
            Column::City => "city search disabled",
            Column::Region => "region filter disabled",
            Column::Contact => "contacts shown as placeholders",
            Column::Services => "service filter disabled",
            Column::Latitude | Column::Longitude => "map markers disabled",
        }
    }
}

/// Set of known columns present in a loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<Column>);

impl ColumnSet {
    /// A set containing every known column.
    pub fn all() -> Self {
        Column::ALL.into_iter().collect()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    pub fn insert(&mut self, column: Column) {
        self.0.insert(column);
    }

    /// Known columns absent from the table, in declaration order.
    pub fn missing(&self) -> impl Iterator<Item = Column> + '_ {
        Column::ALL.into_iter().filter(|c| !self.contains(*c))
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Non-fatal notice that a known column is absent from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnWarning {
    pub column: Column,
    pub header: &'static str,
    pub message: String,
}

impl ColumnWarning {
    pub fn new(column: Column) -> Self {
        Self {
            column,
            header: column.header(),
            message: format!(
                "Column '{}' not found in the data file; {}",
                column.header(),
                column.degraded_feature()
            ),
        }
    }
}

/// One row of the partner table.
///
/// Every field is optional: empty cells and absent columns are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerRecord {
    pub name: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub contact: Option<String>,
    pub services: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PartnerRecord {
    /// Returns the map position when both coordinates are present and valid.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lon) = self.latitude.zip(self.longitude)?;
        Coordinates::new(lat, lon)
    }

    /// Text value of `column`, or `None` for empty cells and coordinates.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => self.name.as_deref(),
            Column::City => self.city.as_deref(),
            Column::Region => self.region.as_deref(),
            Column::Contact => self.contact.as_deref(),
            Column::Services => self.services.as_deref(),
            Column::Latitude | Column::Longitude => None,
        }
    }
}

/// Immutable, in-memory partner table.
///
/// Built once by the record store and shared behind an `Arc`. Filtering
/// borrows records from it and never mutates it.
#[derive(Debug, Clone)]
pub struct PartnerTable {
    pub records: Vec<PartnerRecord>,
    pub columns: ColumnSet,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl PartnerTable {
    pub fn new(records: Vec<PartnerRecord>, columns: ColumnSet, source: impl Into<String>) -> Self {
        Self {
            records,
            columns,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Builds a table with every known column present.
    pub fn in_memory(records: Vec<PartnerRecord>) -> Self {
        Self::new(records, ColumnSet::all(), "memory")
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(column)
    }

    /// Whether a facet on `column` has anything to choose from.
    ///
    /// The column must be present and at least one row must have a value in
    /// it. A facet that is not offered never filters.
    pub fn offers_facet(&self, column: Column) -> bool {
        self.has_column(column) && self.records.iter().any(|r| r.text(column).is_some())
    }

    /// Distinct non-empty region values, sorted.
    pub fn observed_regions(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.region.clone())
            .collect()
    }

    /// Distinct non-empty service values, sorted.
    ///
    /// Returns `None` when the services facet is not offered.
    pub fn observed_services(&self) -> Option<BTreeSet<String>> {
        if !self.offers_facet(Column::Services) {
            return None;
        }

        Some(
            self.records
                .iter()
                .filter_map(|r| r.services.clone())
                .collect(),
        )
    }

    /// One warning per known column missing from the source file.
    pub fn column_warnings(&self) -> Vec<ColumnWarning> {
        self.columns.missing().map(ColumnWarning::new).collect()
    }
}
