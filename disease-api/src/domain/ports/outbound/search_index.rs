//! Symptom search index port (outbound).

use async_trait::async_trait;

use crate::domain::{models::Disease, DiseaseError};

/// Outbound port for the full-text index over `symptoms_text`.
#[async_trait]
pub trait SymptomSearchIndex: Send + Sync + 'static {
    /// Return at most `limit` records matching `query`, best match first.
    ///
    /// Queries without any searchable token return no candidates.
    async fn search_symptoms(&self, query: &str, limit: usize)
        -> Result<Vec<Disease>, DiseaseError>;
}
