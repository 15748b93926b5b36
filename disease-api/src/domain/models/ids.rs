use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a disease record.
///
/// Wraps i64 to match the database BIGSERIAL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseId(i64);

impl DiseaseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DiseaseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<DiseaseId> for i64 {
    fn from(id: DiseaseId) -> Self {
        id.0
    }
}
