mod disease_repository;
mod search_index;

pub use disease_repository::*;
pub use search_index::*;
