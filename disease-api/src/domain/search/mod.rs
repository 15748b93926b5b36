//! Symptom search: tokenizer, in-memory index and relevance re-ranking.
//!
//! Search runs in two stages:
//!
//! 1. A [`SymptomSearchIndex`](crate::domain::ports::outbound::SymptomSearchIndex)
//!    returns a bounded, ranked candidate set for the raw query.
//! 2. [`rank_candidates`] re-scores those candidates by counting the symptoms
//!    that appear inside the query, drops non-matches and keeps the top results.
//!
//! The in-memory [`SymptomIndex`] backs the development store; PostgreSQL
//! builds its `tsquery` from the same [`unique_terms`] output.

mod index;
mod service;
mod tokenizer;

pub use index::SymptomIndex;
pub use service::{rank_candidates, SearchConfig};
pub use tokenizer::unique_terms;
