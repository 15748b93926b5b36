mod diseases;
mod migrations;

pub use diseases::*;
pub use migrations::*;
