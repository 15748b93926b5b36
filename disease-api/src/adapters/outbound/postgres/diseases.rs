//! PostgreSQL implementation of the disease store and symptom index.

use async_trait::async_trait;
use itertools::Itertools;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{Disease, DiseaseDraft, DiseaseId, DiseasePatch, Medicines},
    ports::outbound::{DiseaseRepository, SymptomSearchIndex},
    search::unique_terms,
    DiseaseError,
};

const DISEASE_COLUMNS: &str = r#"
    id, name, category, description, symptoms, symptoms_text, advice, medicines, created_at
"#;

/// PostgreSQL-backed disease store.
///
/// Search runs against the generated `search_vector` column (a `tsvector`
/// over `symptoms_text` with the `simple` configuration) and its GIN index.
#[derive(Clone)]
pub struct PostgresDiseaseRepository {
    pool: PgPool,
}

impl PostgresDiseaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DiseaseRow {
    id: i64,
    name: String,
    category: String,
    description: String,
    symptoms: Vec<String>,
    symptoms_text: Option<String>,
    advice: String,
    medicines: Json<serde_json::Value>,
    created_at: OffsetDateTime,
}

impl TryFrom<DiseaseRow> for Disease {
    type Error = DiseaseError;

    fn try_from(row: DiseaseRow) -> Result<Self, Self::Error> {
        let medicines: Medicines = serde_json::from_value(row.medicines.0).map_err(|err| {
            DiseaseError::storage(format!("malformed medicines on disease {}: {err}", row.id))
        })?;

        Ok(Disease {
            id: DiseaseId::new(row.id),
            name: row.name,
            category: row.category,
            description: row.description,
            symptoms: row.symptoms,
            symptoms_text: row.symptoms_text,
            advice: row.advice,
            medicines,
            created_at: row.created_at,
        })
    }
}

fn map_rows(rows: Vec<DiseaseRow>) -> Result<Vec<Disease>, DiseaseError> {
    rows.into_iter().map(Disease::try_from).collect()
}

/// Build a `to_tsquery` expression: any term may match, the last one as a prefix.
///
/// Returns `None` when the query has no searchable terms.
fn build_tsquery(query: &str) -> Option<String> {
    let terms = unique_terms(query);
    let (last, rest) = terms.split_last()?;

    Some(
        rest.iter()
            .map(String::to_string)
            .chain(std::iter::once(format!("{last}:*")))
            .join(" | "),
    )
}

#[async_trait]
impl DiseaseRepository for PostgresDiseaseRepository {
    async fn insert(&self, draft: &DiseaseDraft) -> Result<DiseaseId, DiseaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO diseases
                (name, category, description, symptoms, symptoms_text, advice, medicines)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(&draft.symptoms)
        .bind(&draft.symptoms_text)
        .bind(&draft.advice)
        .bind(Json(&draft.medicines))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| DiseaseError::storage(err.to_string()))?;

        Ok(DiseaseId::new(id))
    }

    async fn get(&self, id: &DiseaseId) -> Result<Option<Disease>, DiseaseError> {
        let row = sqlx::query_as::<_, DiseaseRow>(&format!(
            "SELECT {DISEASE_COLUMNS} FROM diseases WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| DiseaseError::storage(err.to_string()))?;

        row.map(Disease::try_from).transpose()
    }

    async fn patch(&self, id: &DiseaseId, patch: &DiseasePatch) -> Result<(), DiseaseError> {
        let result = sqlx::query(
            r#"
            UPDATE diseases
            SET symptoms = COALESCE($2, symptoms),
                symptoms_text = COALESCE($3, symptoms_text),
                medicines = COALESCE($4, medicines)
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(&patch.symptoms)
        .bind(&patch.symptoms_text)
        .bind(patch.medicines.as_ref().map(Json))
        .execute(&self.pool)
        .await
        .map_err(|err| DiseaseError::storage(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DiseaseError::NotFound(*id));
        }

        Ok(())
    }

    async fn collect(&self) -> Result<Vec<Disease>, DiseaseError> {
        let rows = sqlx::query_as::<_, DiseaseRow>(&format!(
            "SELECT {DISEASE_COLUMNS} FROM diseases ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| DiseaseError::storage(err.to_string()))?;

        map_rows(rows)
    }
}

#[async_trait]
impl SymptomSearchIndex for PostgresDiseaseRepository {
    async fn search_symptoms(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Disease>, DiseaseError> {
        let Some(tsquery) = build_tsquery(query) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, DiseaseRow>(&format!(
            r#"
            SELECT {DISEASE_COLUMNS}
            FROM diseases
            WHERE search_vector @@ to_tsquery('simple', $1)
            ORDER BY ts_rank_cd(search_vector, to_tsquery('simple', $1)) DESC, id ASC
            LIMIT $2
            "#
        ))
        .bind(&tsquery)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| DiseaseError::storage(err.to_string()))?;

        map_rows(rows)
    }
}
