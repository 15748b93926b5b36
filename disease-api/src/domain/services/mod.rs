mod diseases;
mod migrations;

pub use diseases::DiseaseServiceImpl;
pub use migrations::MigrationServiceImpl;
