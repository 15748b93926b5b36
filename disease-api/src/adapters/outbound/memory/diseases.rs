//! In-memory disease store with an integrated symptom index.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{Disease, DiseaseDraft, DiseaseId, DiseasePatch},
    ports::outbound::{DiseaseRepository, SymptomSearchIndex},
    search::SymptomIndex,
    DiseaseError,
};

/// Disease store backed by a `BTreeMap`, used for local development and tests.
///
/// Documents and their index entries live under one lock, so every write
/// updates both atomically.
///
/// # Examples
///
/// ```ignore
/// let repo = InMemoryDiseaseRepository::new();
/// // or seeded with records, including legacy shapes:
/// let repo = InMemoryDiseaseRepository::with_drafts(vec![draft1, draft2]);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryDiseaseRepository {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    diseases: BTreeMap<DiseaseId, Disease>,
    index: SymptomIndex,
    #[cfg(test)]
    patches: usize,
}

impl State {
    fn insert(&mut self, draft: DiseaseDraft) -> DiseaseId {
        self.last_id += 1;
        let id = DiseaseId::new(self.last_id);
        let disease = draft.into_disease(id, OffsetDateTime::now_utc());

        self.index
            .upsert(id, disease.symptoms_text.as_deref().unwrap_or_default());
        self.diseases.insert(id, disease);
        id
    }
}

impl InMemoryDiseaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `drafts`, stored exactly as given.
    #[cfg(test)]
    pub fn with_drafts(drafts: impl IntoIterator<Item = DiseaseDraft>) -> Self {
        let mut state = State::default();
        for draft in drafts {
            state.insert(draft);
        }

        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of successful patches applied since creation.
    #[cfg(test)]
    pub fn patch_count(&self) -> usize {
        self.read().map(|state| state.patches).unwrap_or_default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DiseaseError> {
        self.state
            .read()
            .map_err(|_| DiseaseError::storage("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DiseaseError> {
        self.state
            .write()
            .map_err(|_| DiseaseError::storage("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl DiseaseRepository for InMemoryDiseaseRepository {
    async fn insert(&self, draft: &DiseaseDraft) -> Result<DiseaseId, DiseaseError> {
        Ok(self.write()?.insert(draft.clone()))
    }

    async fn get(&self, id: &DiseaseId) -> Result<Option<Disease>, DiseaseError> {
        Ok(self.read()?.diseases.get(id).cloned())
    }

    async fn patch(&self, id: &DiseaseId, patch: &DiseasePatch) -> Result<(), DiseaseError> {
        let mut guard = self.write()?;
        let state = &mut *guard;

        let disease = state
            .diseases
            .get_mut(id)
            .ok_or(DiseaseError::NotFound(*id))?;
        disease.apply(patch);

        if patch.symptoms_text.is_some() {
            state
                .index
                .upsert(*id, disease.symptoms_text.as_deref().unwrap_or_default());
        }
        #[cfg(test)]
        {
            state.patches += 1;
        }

        Ok(())
    }

    async fn collect(&self) -> Result<Vec<Disease>, DiseaseError> {
        Ok(self.read()?.diseases.values().cloned().collect())
    }
}

#[async_trait]
impl SymptomSearchIndex for InMemoryDiseaseRepository {
    async fn search_symptoms(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Disease>, DiseaseError> {
        let state = self.read()?;

        Ok(state
            .index
            .search(query, limit)
            .into_iter()
            .filter_map(|id| state.diseases.get(&id).cloned())
            .collect())
    }
}
