//! FAQ corpus data model.
//!
//! A [`Corpus`] is an ordered list of [`Category`] values, each holding an
//! ordered list of [`QaEntry`] question/answer pairs. Order is significant:
//! the matcher scans first-category-first, first-question-first, and ties
//! go to whichever entry was seen first.
//!
//! The on-disk form is JSON:
//!
//! ```json
//! {
//!   "categories": [
//!     {
//!       "name": "General",
//!       "questions": [
//!         { "question": "What is a barangay?", "answer": "The smallest local government unit." }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::source::CorpusError;

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A named group of [`QaEntry`] records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(alias = "faqs")]
    pub questions: Vec<QaEntry>,
}

impl Category {
    pub fn new(name: impl Into<String>, questions: Vec<QaEntry>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }
}

/// The full, immutable FAQ corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub categories: Vec<Category>,
}

/// A borrowed view of one entry together with the category it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    pub category: &'a str,
    pub entry: &'a QaEntry,
}

impl Corpus {
    /// Build a corpus from categories, checking the entry invariants.
    pub fn new(categories: Vec<Category>) -> Result<Self, CorpusError> {
        let corpus = Self { categories };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Parse and validate a JSON corpus document.
    ///
    /// Any shape mismatch or an entry with a blank answer is reported as
    /// [`CorpusError::Malformed`].
    pub fn from_json(text: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus =
            serde_json::from_str(text).map_err(|e| CorpusError::Malformed(e.to_string()))?;
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> Result<(), CorpusError> {
        for category in &self.categories {
            for (i, entry) in category.questions.iter().enumerate() {
                if entry.answer.trim().is_empty() {
                    return Err(CorpusError::Malformed(format!(
                        "category '{}' entry {} has an empty answer",
                        category.name, i
                    )));
                }
            }
        }
        Ok(())
    }

    /// All entries in scan order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef<'_>> {
        self.categories.iter().flat_map(|c| {
            c.questions.iter().map(move |entry| EntryRef {
                category: c.name.as_str(),
                entry,
            })
        })
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
