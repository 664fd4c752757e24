//! Best-answer selection over the FAQ corpus.
//!
//! # Scoring Algorithm
//!
//! 1. Normalize the query: trim surrounding whitespace, lower-case.
//! 2. Scan every entry in corpus order (category order, then question order).
//! 3. If an entry's lower-cased, trimmed question equals the normalized
//!    query, return it immediately. Thresholds do not apply.
//! 4. Otherwise score the entry: `similarity = ratio(query, question)`;
//!    if the two share any word, `score = max(similarity, 0.8 × word_score)`.
//! 5. Keep the first entry reaching the highest score (strict `>`).
//! 6. Accept the winner when `score >= threshold`.
//!
//! A corpus that cannot be loaded matches nothing.

use serde::Serialize;

use crate::similarity::{ratio_chars, word_overlap};
use crate::source::{CorpusError, CorpusSource};

/// Weight applied to the word-overlap score before it competes with the
/// character similarity.
pub const KEYWORD_WEIGHT: f64 = 0.8;

/// Outcome of a single thresholded lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Found(String),
    NotFound,
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    pub fn into_answer(self) -> Option<String> {
        match self {
            MatchResult::Found(answer) => Some(answer),
            MatchResult::NotFound => None,
        }
    }
}

/// The winning entry of a scan, with its scoring breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub category: String,
    pub question: String,
    pub answer: String,
    /// Final score: `max(similarity, KEYWORD_WEIGHT × word_score)`.
    /// Exact matches report `1.0`.
    pub score: f64,
    pub similarity: f64,
    /// Word-overlap share, when any word is shared.
    pub word_score: Option<f64>,
    /// Won through the exact-question short-circuit.
    pub exact: bool,
}

impl Candidate {
    /// Whether this candidate is accepted at `threshold`.
    pub fn accepted_at(&self, threshold: f64) -> bool {
        self.exact || self.score >= threshold
    }
}

/// Scans a [`CorpusSource`] for the best answer to a query.
pub struct Matcher<S> {
    source: S,
}

impl<S: CorpusSource> Matcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one full scan and return the winning entry, if any scored above
    /// zero.
    ///
    /// Corpus failures are returned as-is so callers can tell a missing
    /// corpus apart from an empty result.
    pub fn best_candidate(&self, query: &str) -> Result<Option<Candidate>, CorpusError> {
        let corpus = self.source.corpus()?;

        let normalized = normalize(query);
        let query_chars: Vec<char> = normalized.chars().collect();

        let mut best_score = 0.0;
        let mut best: Option<Candidate> = None;

        for item in corpus.entries() {
            let question = item.entry.question.to_lowercase();
            let question = question.trim();

            if question == normalized {
                return Ok(Some(Candidate {
                    category: item.category.to_string(),
                    question: item.entry.question.clone(),
                    answer: item.entry.answer.clone(),
                    score: 1.0,
                    similarity: 1.0,
                    word_score: None,
                    exact: true,
                }));
            }

            let question_chars: Vec<char> = question.chars().collect();
            let similarity = ratio_chars(&query_chars, &question_chars);
            let word_score = word_overlap(question, &normalized);
            let score = match word_score {
                Some(w) => similarity.max(w * KEYWORD_WEIGHT),
                None => similarity,
            };

            if score > best_score {
                best_score = score;
                best = Some(Candidate {
                    category: item.category.to_string(),
                    question: item.entry.question.clone(),
                    answer: item.entry.answer.clone(),
                    score,
                    similarity,
                    word_score,
                    exact: false,
                });
            }
        }

        Ok(best)
    }

    /// Find the best answer for `query`, accepted at `threshold`.
    ///
    /// Never fails: an unavailable corpus yields [`MatchResult::NotFound`].
    pub fn find_best_match(&self, query: &str, threshold: f64) -> MatchResult {
        match self.best_candidate(query) {
            Ok(Some(candidate)) if candidate.accepted_at(threshold) => {
                MatchResult::Found(candidate.answer)
            }
            Ok(_) => MatchResult::NotFound,
            Err(e) => {
                tracing::debug!(error = %e, "FAQ lookup without a corpus");
                MatchResult::NotFound
            }
        }
    }
}

/// Trim and lower-case free text for comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
