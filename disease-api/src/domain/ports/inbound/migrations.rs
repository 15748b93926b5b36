use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DiseaseError;

/// Report of `backfill_symptoms_text`.
///
/// `updated` counts every record scanned, not only the ones patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub updated: usize,
}

/// Report of `fix_medicines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixMedicinesReport {
    pub fixed: usize,
}

/// Inbound port for the one-off data repair jobs.
///
/// Both jobs are idempotent and patch one record at a time, so an interrupted
/// run can simply be started again.
#[async_trait]
pub trait MigrationService: Send + Sync + 'static {
    /// Fill in `symptoms_text` on records that lack it.
    async fn backfill_symptoms_text(&self) -> Result<BackfillReport, DiseaseError>;

    /// Convert legacy string medicine lists to structured medicines.
    async fn fix_medicines(&self) -> Result<FixMedicinesReport, DiseaseError>;
}
