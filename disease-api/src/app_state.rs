use std::sync::Arc;

use crate::domain::ports::inbound::{DiseaseService, MigrationService};

/// Shared state handed to every route.
///
/// Holds the inbound ports only; which store backs them is decided in
/// `crate::factory`.
#[derive(Clone)]
pub struct AppState {
    pub disease_service: Arc<dyn DiseaseService>,
    pub migration_service: Arc<dyn MigrationService>,
}

impl AppState {
    pub fn new(
        disease_service: Arc<dyn DiseaseService>,
        migration_service: Arc<dyn MigrationService>,
    ) -> Self {
        Self {
            disease_service,
            migration_service,
        }
    }
}
