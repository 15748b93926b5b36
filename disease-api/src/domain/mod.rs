mod error;

pub mod models;
pub mod ports;
pub mod search;
pub mod services;

pub use error::DiseaseError;
