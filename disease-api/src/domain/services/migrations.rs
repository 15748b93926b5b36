use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{
    models::{symptoms_text, DiseasePatch},
    ports::{
        inbound::{BackfillReport, FixMedicinesReport, MigrationService},
        outbound::DiseaseRepository,
    },
    DiseaseError,
};

/// Implementation of the MigrationService inbound port.
///
/// Each job scans the whole store and patches records one by one. A failing
/// patch aborts the run; records patched before it stay fixed.
pub struct MigrationServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> MigrationServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: DiseaseRepository> MigrationService for MigrationServiceImpl<R> {
    async fn backfill_symptoms_text(&self) -> Result<BackfillReport, DiseaseError> {
        let diseases = self.repository.collect().await?;
        let scanned = diseases.len();
        let mut patched = 0;

        for disease in diseases.iter().filter(|d| d.needs_symptoms_text()) {
            let text = symptoms_text(&disease.symptoms);
            self.repository
                .patch(&disease.id, &DiseasePatch::symptoms_text(text))
                .await?;

            debug!(id = %disease.id, "Backfilled symptoms text");
            patched += 1;
        }

        info!(scanned, patched, "Symptoms text backfill finished");

        // Reports every scanned record, patched or not.
        Ok(BackfillReport { updated: scanned })
    }

    async fn fix_medicines(&self) -> Result<FixMedicinesReport, DiseaseError> {
        let diseases = self.repository.collect().await?;
        let scanned = diseases.len();
        let mut fixed = 0;

        for disease in diseases.into_iter().filter(|d| d.medicines.is_legacy()) {
            let medicines = disease.medicines.into_structured();
            let count = medicines.len();
            self.repository
                .patch(&disease.id, &DiseasePatch::medicines(medicines))
                .await?;

            debug!(id = %disease.id, count, "Converted legacy medicines");
            fixed += 1;
        }

        info!(scanned, fixed, "Medicines fix finished");
        Ok(FixMedicinesReport { fixed })
    }
}
