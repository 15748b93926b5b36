use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{DiseaseId, Medicine, Medicines};

/// Derive the searchable symptom text from a symptom list.
pub fn symptoms_text(symptoms: &[String]) -> String {
    symptoms.join(" ")
}

/// A stored disease record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub id: DiseaseId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub symptoms: Vec<String>,
    /// Cached `symptoms` joined by spaces. Missing on records that predate the field.
    pub symptoms_text: Option<String>,
    pub advice: String,
    pub medicines: Medicines,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Disease {
    /// True when the derived symptom text is absent or empty.
    pub fn needs_symptoms_text(&self) -> bool {
        self.symptoms_text.as_deref().map_or(true, str::is_empty)
    }

    pub fn apply(&mut self, patch: &DiseasePatch) {
        if let Some(symptoms) = &patch.symptoms {
            self.symptoms = symptoms.clone();
        }
        if let Some(text) = &patch.symptoms_text {
            self.symptoms_text = Some(text.clone());
        }
        if let Some(medicines) = &patch.medicines {
            self.medicines = Medicines::Structured(medicines.clone());
        }
    }
}

/// Arguments of `addDisease`, validated by shape only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewDisease {
    pub name: String,
    pub category: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub advice: String,
    pub medicines: Vec<Medicine>,
}

impl NewDisease {
    pub fn into_draft(self) -> DiseaseDraft {
        let symptoms_text = symptoms_text(&self.symptoms);

        DiseaseDraft {
            name: self.name,
            category: self.category,
            description: self.description,
            symptoms: self.symptoms,
            symptoms_text: Some(symptoms_text),
            advice: self.advice,
            medicines: Medicines::Structured(self.medicines),
        }
    }
}

/// A record about to be inserted. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub symptoms_text: Option<String>,
    pub advice: String,
    pub medicines: Medicines,
}

impl DiseaseDraft {
    pub fn into_disease(self, id: DiseaseId, created_at: OffsetDateTime) -> Disease {
        Disease {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            symptoms: self.symptoms,
            symptoms_text: self.symptoms_text,
            advice: self.advice,
            medicines: self.medicines,
            created_at,
        }
    }
}

/// Partial update of a record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiseasePatch {
    pub symptoms: Option<Vec<String>>,
    pub symptoms_text: Option<String>,
    pub medicines: Option<Vec<Medicine>>,
}

impl DiseasePatch {
    /// Replace the symptom list together with its derived text.
    pub fn symptoms(symptoms: Vec<String>) -> Self {
        let text = symptoms_text(&symptoms);
        Self {
            symptoms: Some(symptoms),
            symptoms_text: Some(text),
            ..Default::default()
        }
    }

    pub fn symptoms_text(text: impl Into<String>) -> Self {
        Self {
            symptoms_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn medicines(medicines: Vec<Medicine>) -> Self {
        Self {
            medicines: Some(medicines),
            ..Default::default()
        }
    }
}

/// A search hit: the record plus its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDisease {
    #[serde(flatten)]
    pub disease: Disease,
    pub score: u32,
}
