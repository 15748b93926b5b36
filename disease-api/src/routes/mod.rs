pub(crate) mod error;
pub(crate) mod functions;

pub(crate) use error::ApiError;
