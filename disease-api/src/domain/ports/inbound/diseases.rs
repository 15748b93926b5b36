use async_trait::async_trait;

use crate::domain::{
    models::{Disease, DiseaseId, NewDisease, ScoredDisease},
    DiseaseError,
};

/// Inbound port for disease lookups and edits.
///
/// This trait defines the use cases that the function gateway can invoke.
#[async_trait]
pub trait DiseaseService: Send + Sync + 'static {
    /// Insert a disease, deriving its symptom text. Returns the new id.
    async fn add_disease(&self, disease: NewDisease) -> Result<DiseaseId, DiseaseError>;

    /// Get a single disease by id.
    async fn get_disease(&self, id: &DiseaseId) -> Result<Disease, DiseaseError>;

    /// Replace the symptom list of a disease, keeping the derived text in sync.
    async fn update_symptoms(
        &self,
        id: &DiseaseId,
        symptoms: Vec<String>,
    ) -> Result<(), DiseaseError>;

    /// Search diseases by free-text symptom description.
    async fn search_diseases(&self, query: &str) -> Result<Vec<ScoredDisease>, DiseaseError>;
}
