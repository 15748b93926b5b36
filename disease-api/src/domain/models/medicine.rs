use serde::{Deserialize, Serialize};

pub const LEGACY_DOSAGE: &str = "As directed";
pub const LEGACY_FREQUENCY: &str = "As directed";
pub const LEGACY_DURATION: &str = "As needed";

/// A medicine recommendation attached to a disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl Medicine {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            duration: duration.into(),
        }
    }

    /// Upgrade a bare legacy medicine name to the structured shape.
    pub fn from_legacy(name: impl Into<String>) -> Self {
        Self::new(name, LEGACY_DOSAGE, LEGACY_FREQUENCY, LEGACY_DURATION)
    }
}

/// Medicines as they may be found in storage.
///
/// Older records stored a plain list of names. Decoding tries the structured
/// shape first, so an empty list always reads as `Structured`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Medicines {
    Structured(Vec<Medicine>),
    Legacy(Vec<String>),
}

impl Medicines {
    /// Names of a non-empty legacy list, `None` otherwise.
    pub fn legacy_names(&self) -> Option<&[String]> {
        match self {
            Medicines::Legacy(names) if !names.is_empty() => Some(names),
            _ => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy_names().is_some()
    }

    pub fn into_structured(self) -> Vec<Medicine> {
        match self {
            Medicines::Structured(medicines) => medicines,
            Medicines::Legacy(names) => names.into_iter().map(Medicine::from_legacy).collect(),
        }
    }
}

impl From<Vec<Medicine>> for Medicines {
    fn from(medicines: Vec<Medicine>) -> Self {
        Medicines::Structured(medicines)
    }
}

impl Default for Medicines {
    fn default() -> Self {
        Medicines::Structured(Vec::new())
    }
}
