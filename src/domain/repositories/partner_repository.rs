//! Repository trait for the partner record store.

use std::sync::Arc;

use crate::domain::entities::PartnerTable;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the partner table.
///
/// Implementations load the source once and hand out the same shared table
/// on every later call. The table is never mutated or reloaded while the
/// process runs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::CsvPartnerRepository`] - Delimited file source
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Returns the partner table, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataUnavailable`] if the source is missing or
    /// unreadable. Failures are not cached; a later call retries the load.
    async fn load(&self) -> Result<Arc<PartnerTable>, AppError>;

    /// Human-readable location of the source, for logs and health output.
    fn source(&self) -> String;
}
