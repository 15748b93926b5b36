mod diseases;

pub use diseases::InMemoryDiseaseRepository;
