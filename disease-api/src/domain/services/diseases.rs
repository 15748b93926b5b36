use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{
    models::{Disease, DiseaseId, DiseasePatch, NewDisease, ScoredDisease},
    ports::{
        inbound::DiseaseService,
        outbound::{DiseaseRepository, SymptomSearchIndex},
    },
    search::{rank_candidates, SearchConfig},
    DiseaseError,
};

/// Implementation of the DiseaseService inbound port.
///
/// Writes go through the DiseaseRepository; searches ask the
/// SymptomSearchIndex for candidates and re-rank them in memory.
pub struct DiseaseServiceImpl<R, I> {
    repository: Arc<R>,
    index: Arc<I>,
    config: SearchConfig,
}

impl<R, I> DiseaseServiceImpl<R, I> {
    pub fn new(repository: Arc<R>, index: Arc<I>, config: SearchConfig) -> Self {
        Self {
            repository,
            index,
            config,
        }
    }
}

#[async_trait]
impl<R: DiseaseRepository, I: SymptomSearchIndex> DiseaseService for DiseaseServiceImpl<R, I> {
    async fn add_disease(&self, disease: NewDisease) -> Result<DiseaseId, DiseaseError> {
        let draft = disease.into_draft();
        let id = self.repository.insert(&draft).await?;

        info!(%id, name = %draft.name, symptoms = draft.symptoms.len(), "Disease added");
        Ok(id)
    }

    async fn get_disease(&self, id: &DiseaseId) -> Result<Disease, DiseaseError> {
        self.repository
            .get(id)
            .await?
            .ok_or(DiseaseError::NotFound(*id))
    }

    async fn update_symptoms(
        &self,
        id: &DiseaseId,
        symptoms: Vec<String>,
    ) -> Result<(), DiseaseError> {
        self.repository
            .patch(id, &DiseasePatch::symptoms(symptoms))
            .await?;

        info!(%id, "Disease symptoms updated");
        Ok(())
    }

    async fn search_diseases(&self, query: &str) -> Result<Vec<ScoredDisease>, DiseaseError> {
        let candidates = self
            .index
            .search_symptoms(query, self.config.candidate_limit)
            .await?;
        let candidate_count = candidates.len();

        let results = rank_candidates(query, candidates, self.config.result_limit);

        debug!(
            candidates = candidate_count,
            results = results.len(),
            "Disease search completed"
        );
        Ok(results)
    }
}
