//! In-memory inverted index over symptom text.
//!
//! Matching mirrors what a hosted search index offers for search-as-you-type:
//!
//! - **exact** term matches score highest,
//! - the **last** query term also matches as a prefix,
//! - longer terms tolerate typos (edit distance 1 from 5 bytes, 2 from 9 bytes).
//!
//! Each query term contributes its best match per document; documents are
//! ranked by the summed weight, ties broken by ascending id.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::LazyLock;

use itertools::Itertools;
use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder, DFA};

use super::tokenizer::unique_terms;
use crate::domain::models::DiseaseId;

const EXACT_WEIGHT: u32 = 2;
const PREFIX_WEIGHT: u32 = 1;
const FUZZY_WEIGHT: u32 = 1;

const ONE_TYPO_MIN_LEN: usize = 5;
const TWO_TYPOS_MIN_LEN: usize = 9;

static ONE_TYPO: LazyLock<LevenshteinAutomatonBuilder> =
    LazyLock::new(|| LevenshteinAutomatonBuilder::new(1, true));
static TWO_TYPOS: LazyLock<LevenshteinAutomatonBuilder> =
    LazyLock::new(|| LevenshteinAutomatonBuilder::new(2, true));

#[derive(Debug, Default, Clone)]
pub struct SymptomIndex {
    postings: BTreeMap<String, BTreeSet<DiseaseId>>,
    documents: HashMap<DiseaseId, Vec<String>>,
}

impl SymptomIndex {
    /// Index `text` for `id`, replacing whatever was indexed for it before.
    pub fn upsert(&mut self, id: DiseaseId, text: &str) {
        self.remove(id);

        let terms = unique_terms(text);
        for term in &terms {
            self.postings.entry(term.clone()).or_default().insert(id);
        }
        self.documents.insert(id, terms);
    }

    fn remove(&mut self, id: DiseaseId) {
        let Some(terms) = self.documents.remove(&id) else {
            return;
        };

        for term in terms {
            if let Some(ids) = self.postings.get_mut(&term) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.postings.remove(&term);
                }
            }
        }
    }

    /// Ids of the best `limit` documents for `query`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<DiseaseId> {
        let terms = unique_terms(query);
        let Some(last) = terms.len().checked_sub(1) else {
            return Vec::new();
        };

        let mut scores: HashMap<DiseaseId, u32> = HashMap::new();

        for (position, term) in terms.iter().enumerate() {
            let mut best: HashMap<DiseaseId, u32> = HashMap::new();

            if let Some(ids) = self.postings.get(term) {
                credit(&mut best, ids, EXACT_WEIGHT);
            }

            if position == last {
                let after = (Bound::Excluded(term.as_str()), Bound::Unbounded);
                for (_, ids) in self
                    .postings
                    .range::<str, _>(after)
                    .take_while(|(candidate, _)| candidate.starts_with(term.as_str()))
                {
                    credit(&mut best, ids, PREFIX_WEIGHT);
                }
            }

            if let Some(dfa) = typo_automaton(term) {
                for (candidate, ids) in &self.postings {
                    if candidate != term && within_distance(&dfa, candidate) {
                        credit(&mut best, ids, FUZZY_WEIGHT);
                    }
                }
            }

            for (id, weight) in best {
                *scores.entry(id).or_insert(0) += weight;
            }
        }

        scores
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .take(limit)
            .map(|(id, _)| id)
            .collect()
    }
}

fn credit(best: &mut HashMap<DiseaseId, u32>, ids: &BTreeSet<DiseaseId>, weight: u32) {
    for id in ids {
        let current = best.entry(*id).or_insert(0);
        *current = (*current).max(weight);
    }
}

fn typo_automaton(term: &str) -> Option<DFA> {
    match term.len() {
        len if len >= TWO_TYPOS_MIN_LEN => Some(TWO_TYPOS.build_dfa(term)),
        len if len >= ONE_TYPO_MIN_LEN => Some(ONE_TYPO.build_dfa(term)),
        _ => None,
    }
}

fn within_distance(dfa: &DFA, candidate: &str) -> bool {
    let mut state = dfa.initial_state();
    for &byte in candidate.as_bytes() {
        state = dfa.transition(state, byte);
    }
    matches!(dfa.distance(state), Distance::Exact(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> DiseaseId {
        DiseaseId::new(n)
    }

    fn index(docs: &[(i64, &str)]) -> SymptomIndex {
        let mut index = SymptomIndex::default();
        for (n, text) in docs {
            index.upsert(id(*n), text);
        }
        index
    }

    #[test]
    fn exact_term_matches() {
        let index = index(&[(1, "fever cough"), (2, "rash itching")]);

        assert_eq!(index.search("cough", 10), vec![id(1)]);
        assert_eq!(index.search("itching", 10), vec![id(2)]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = index(&[(1, "Fever Cough")]);

        assert_eq!(index.search("FEVER", 10), vec![id(1)]);
    }

    #[test]
    fn more_matching_terms_rank_higher() {
        let index = index(&[(1, "fever"), (2, "fever cough headache"), (3, "cough")]);

        let results = index.search("fever cough", 10);
        assert_eq!(results[0], id(2));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let index = index(&[(3, "fever"), (1, "fever"), (2, "fever")]);

        assert_eq!(index.search("fever", 10), vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn last_term_matches_as_prefix() {
        let index = index(&[(1, "headache"), (2, "fever")]);

        assert_eq!(index.search("head", 10), vec![id(1)]);
    }

    #[test]
    fn only_last_term_is_a_prefix() {
        let index = index(&[(1, "headache nausea")]);

        assert!(index.search("head zzz", 10).is_empty());
        assert_eq!(index.search("zzz head", 10), vec![id(1)]);
    }

    #[test]
    fn exact_beats_prefix() {
        let index = index(&[(1, "coughing"), (2, "cough")]);

        assert_eq!(index.search("cough", 10), vec![id(2), id(1)]);
    }

    #[test]
    fn tolerates_a_typo_in_longer_terms() {
        let index = index(&[(1, "diarrhea"), (2, "rash")]);

        assert_eq!(index.search("diarhea and more", 10), vec![id(1)]);
    }

    #[test]
    fn short_terms_need_exact_or_prefix_match() {
        let index = index(&[(1, "rash")]);

        assert!(index.search("rush now", 10).is_empty());
    }

    #[test]
    fn respects_limit() {
        let docs: Vec<(i64, &str)> = (1..=20).map(|n| (n, "fever")).collect();
        let index = index(&docs);

        assert_eq!(index.search("fever", 10).len(), 10);
        assert!(index.search("fever", 0).is_empty());
    }

    #[test]
    fn empty_query_has_no_candidates() {
        let index = index(&[(1, "fever")]);

        assert!(index.search("", 10).is_empty());
        assert!(index.search(" ?! ", 10).is_empty());
    }

    #[test]
    fn upsert_replaces_previous_terms() {
        let mut index = index(&[(1, "fever cough")]);
        index.upsert(id(1), "rash");

        assert!(index.search("fever", 10).is_empty());
        assert_eq!(index.search("rash", 10), vec![id(1)]);
        assert_eq!(index.documents.len(), 1);
    }

    #[test]
    fn remove_drops_document_and_empty_postings() {
        let mut index = index(&[(1, "fever"), (2, "fever cough")]);
        index.remove(id(2));

        assert_eq!(index.search("fever", 10), vec![id(1)]);
        assert!(index.search("cough", 10).is_empty());
        assert!(!index.postings.contains_key("cough"));

        index.remove(id(1));
        assert!(index.documents.is_empty());
        assert!(index.postings.is_empty());
    }
}
