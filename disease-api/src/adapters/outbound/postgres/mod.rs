mod diseases;

pub use diseases::PostgresDiseaseRepository;
