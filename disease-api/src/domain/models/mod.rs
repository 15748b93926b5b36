mod disease;
mod ids;
mod medicine;

pub use disease::*;
pub use ids::*;
pub use medicine::*;
