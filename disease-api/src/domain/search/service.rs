//! Relevance re-ranking of search index candidates.

use serde::Deserialize;

use crate::domain::models::{Disease, ScoredDisease};

/// Configuration for disease search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Number of candidates fetched from the index
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    /// Maximum number of results returned to the caller
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_candidate_limit() -> usize {
    10
}

fn default_result_limit() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
            result_limit: default_result_limit(),
        }
    }
}

/// Count the symptoms that appear verbatim inside the query.
///
/// The check runs query-contains-symptom: "fever" scores against
/// "I have a fever", but "fev" never scores against a "fever" symptom.
/// `query_lower` must already be lower-cased.
pub fn symptom_score(query_lower: &str, symptoms: &[String]) -> u32 {
    symptoms
        .iter()
        .filter(|symptom| query_lower.contains(&symptom.to_lowercase()))
        .count() as u32
}

/// Score index candidates against the raw query and keep the best ones.
///
/// Candidates scoring zero are dropped. The sort is stable, so equal scores
/// keep the order the index returned them in.
pub fn rank_candidates(
    query: &str,
    candidates: Vec<Disease>,
    result_limit: usize,
) -> Vec<ScoredDisease> {
    let query_lower = query.to_lowercase();

    let mut scored: Vec<ScoredDisease> = candidates
        .into_iter()
        .map(|disease| {
            let score = symptom_score(&query_lower, &disease.symptoms);
            ScoredDisease { disease, score }
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(result_limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DiseaseId, Medicines};
    use time::OffsetDateTime;

    fn make_disease(id: i64, name: &str, symptoms: &[&str]) -> Disease {
        let symptoms: Vec<String> = symptoms.iter().map(|s| s.to_string()).collect();
        Disease {
            id: DiseaseId::new(id),
            name: name.to_string(),
            category: "General".to_string(),
            description: String::new(),
            symptoms_text: Some(symptoms.join(" ")),
            symptoms,
            advice: String::new(),
            medicines: Medicines::default(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn default_limits() {
        let config = SearchConfig::default();
        assert_eq!(config.candidate_limit, 10);
        assert_eq!(config.result_limit, 5);
    }

    #[test]
    fn score_counts_symptoms_contained_in_query() {
        let symptoms = vec!["fever".to_string(), "cough".to_string()];

        assert_eq!(symptom_score("i have a fever", &symptoms), 1);
        assert_eq!(symptom_score("fever and a dry cough", &symptoms), 2);
        assert_eq!(symptom_score("headache", &symptoms), 0);
    }

    #[test]
    fn score_is_query_contains_symptom_not_the_reverse() {
        let symptoms = vec!["fever".to_string()];

        assert_eq!(symptom_score("fev", &symptoms), 0);
        assert_eq!(symptom_score("feverish", &symptoms), 1);
    }

    #[test]
    fn score_ignores_symptom_case() {
        let symptoms = vec!["Sore Throat".to_string()];

        assert_eq!(symptom_score("my sore throat hurts", &symptoms), 1);
    }

    #[test]
    fn rank_lowercases_query() {
        let ranked = rank_candidates(
            "I Have A FEVER",
            vec![make_disease(1, "Flu", &["fever", "cough"])],
            5,
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].disease.name, "Flu");
        assert_eq!(ranked[0].score, 1);
    }

    #[test]
    fn rank_drops_zero_scores() {
        let ranked = rank_candidates(
            "fever",
            vec![
                make_disease(1, "Flu", &["fever"]),
                make_disease(2, "Eczema", &["rash"]),
            ],
            5,
        );

        assert_eq!(ranked.len(), 1);
        assert!(ranked.iter().all(|r| r.score > 0));
    }

    #[test]
    fn rank_orders_by_score_and_keeps_index_order_on_ties() {
        let ranked = rank_candidates(
            "fever cough headache",
            vec![
                make_disease(1, "A", &["fever"]),
                make_disease(2, "B", &["fever", "cough", "headache"]),
                make_disease(3, "C", &["cough"]),
                make_disease(4, "D", &["fever", "cough"]),
            ],
            5,
        );

        let names: Vec<&str> = ranked.iter().map(|r| r.disease.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn rank_truncates_to_result_limit() {
        let candidates = (1..=10)
            .map(|n| make_disease(n, &format!("D{n}"), &["fever"]))
            .collect();

        let ranked = rank_candidates("fever", candidates, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].disease.name, "D1");
    }

    #[test]
    fn rank_empty_query_scores_nothing() {
        let ranked = rank_candidates("", vec![make_disease(1, "Flu", &["fever"])], 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn empty_symptom_matches_any_query() {
        // An empty symptom string is contained in every query.
        let ranked = rank_candidates("anything", vec![make_disease(1, "Odd", &[""])], 5);
        assert_eq!(ranked[0].score, 1);
    }
}
