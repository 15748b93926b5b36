//! Composition root: builds the services over the configured store.
//!
//! This is the ONLY place that imports concrete outbound adapters.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    adapters::outbound::{memory::InMemoryDiseaseRepository, postgres::PostgresDiseaseRepository},
    app_state::AppState,
    config::{Settings, StorageBackend},
    domain::{
        ports::outbound::{DiseaseRepository, SymptomSearchIndex},
        search::SearchConfig,
        services::{DiseaseServiceImpl, MigrationServiceImpl},
    },
};

/// Create the application state for the configured storage backend.
///
/// For PostgreSQL this connects and applies pending schema migrations first.
pub async fn create_app_state(settings: &Settings) -> anyhow::Result<AppState> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, data is lost on shutdown");
            Ok(app_state_for(
                Arc::new(InMemoryDiseaseRepository::new()),
                settings.search.clone(),
            ))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .connect_with(settings.database.with_db())
                .await
                .with_context(|| {
                    format!(
                        "failed to connect to postgres at {}:{}",
                        settings.database.host, settings.database.port
                    )
                })?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(app_state_for(
                Arc::new(PostgresDiseaseRepository::new(pool)),
                settings.search.clone(),
            ))
        }
    }
}

/// Wire both services to one store that is also its own search index.
pub fn app_state_for<S>(store: Arc<S>, search: SearchConfig) -> AppState
where
    S: DiseaseRepository + SymptomSearchIndex,
{
    let disease_service = DiseaseServiceImpl::new(store.clone(), store.clone(), search);
    let migration_service = MigrationServiceImpl::new(store);

    AppState::new(Arc::new(disease_service), Arc::new(migration_service))
}
