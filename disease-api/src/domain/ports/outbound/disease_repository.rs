//! Disease document store port (outbound).
//!
//! Defines the interface for persisting disease records.

use async_trait::async_trait;

use crate::domain::{
    models::{Disease, DiseaseDraft, DiseaseId, DiseasePatch},
    DiseaseError,
};

/// Outbound port for the disease document store.
///
/// Every method is a single atomic unit: a patch either lands completely or
/// not at all, and the search index reflects it once the call returns.
#[async_trait]
pub trait DiseaseRepository: Send + Sync + 'static {
    /// Insert a new record and return its store-assigned id.
    async fn insert(&self, draft: &DiseaseDraft) -> Result<DiseaseId, DiseaseError>;

    /// Get a record by id.
    async fn get(&self, id: &DiseaseId) -> Result<Option<Disease>, DiseaseError>;

    /// Apply a partial update to an existing record.
    ///
    /// Fails with `NotFound` when no record has this id.
    async fn patch(&self, id: &DiseaseId, patch: &DiseasePatch) -> Result<(), DiseaseError>;

    /// Collect every record, ordered by id.
    async fn collect(&self) -> Result<Vec<Disease>, DiseaseError>;
}
