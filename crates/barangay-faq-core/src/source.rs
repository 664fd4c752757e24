//! Corpus provider abstraction.
//!
//! The [`CorpusSource`] trait is the seam between the pure matching logic
//! and wherever the corpus actually lives. The application crate provides a
//! lazily loaded, file-backed implementation; tests and embedders can use
//! [`StaticCorpus`] to inject a synthetic corpus.
//!
//! Implementations must be `Send + Sync`: one provider is shared by every
//! concurrent request.

use std::sync::Arc;

use crate::models::Corpus;

/// Why a corpus could not be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorpusError {
    /// The source document is missing or unreadable.
    #[error("FAQ corpus unavailable: {0}")]
    Unavailable(String),
    /// The source document was read but does not have the expected shape.
    #[error("FAQ corpus malformed: {0}")]
    Malformed(String),
    /// Any other fault while obtaining the corpus.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CorpusError {
    /// `true` for the failures that degrade to "no match" rather than an
    /// apology: a missing or malformed source.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CorpusError::Unavailable(_) | CorpusError::Malformed(_))
    }
}

/// Anything that can hand out the shared, read-only corpus.
pub trait CorpusSource: Send + Sync {
    /// Return the corpus, loading it first if necessary.
    ///
    /// Successful results may be cached; failures must not be.
    fn corpus(&self) -> Result<Arc<Corpus>, CorpusError>;

    /// Whether a corpus is already available without further loading.
    fn is_loaded(&self) -> bool {
        true
    }
}

impl<T: CorpusSource + ?Sized> CorpusSource for Arc<T> {
    fn corpus(&self) -> Result<Arc<Corpus>, CorpusError> {
        (**self).corpus()
    }

    fn is_loaded(&self) -> bool {
        (**self).is_loaded()
    }
}

/// A corpus that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticCorpus {
    corpus: Arc<Corpus>,
}

impl StaticCorpus {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus: Arc::new(corpus),
        }
    }
}

impl From<Corpus> for StaticCorpus {
    fn from(corpus: Corpus) -> Self {
        Self::new(corpus)
    }
}

impl CorpusSource for StaticCorpus {
    fn corpus(&self) -> Result<Arc<Corpus>, CorpusError> {
        Ok(self.corpus.clone())
    }
}
