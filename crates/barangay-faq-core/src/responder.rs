//! Two-tier reply selection.
//!
//! The responder asks the [`Matcher`] for the best candidate once and
//! accepts it at [`PRIMARY_THRESHOLD`], then at [`FALLBACK_THRESHOLD`].
//! Scores do not depend on the threshold, so this is equivalent to two
//! independent scans. When neither tier accepts, [`DEFAULT_REPLY`] is
//! returned. Internal faults (including panics during scoring) become
//! [`APOLOGY_REPLY`]. The caller always gets displayable text.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::matcher::{Candidate, Matcher};
use crate::source::{CorpusError, CorpusSource};

pub const PRIMARY_THRESHOLD: f64 = 0.5;
pub const FALLBACK_THRESHOLD: f64 = 0.3;

pub const DEFAULT_REPLY: &str = "I'm sorry, I couldn't find an answer to that. Please try \
rephrasing your question or contact the Barangay Legal Aid office directly.";

pub const APOLOGY_REPLY: &str =
    "Sorry, something went wrong while processing your message. Please try again later.";

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Fallback,
    Default,
    Apology,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Fallback => "fallback",
            Tier::Default => "default",
            Tier::Apology => "apology",
        }
    }
}

/// A reply and the tier that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub tier: Tier,
    pub text: String,
}

impl Reply {
    fn new(tier: Tier, text: impl Into<String>) -> Self {
        Self {
            tier,
            text: text.into(),
        }
    }
}

pub struct Responder<S> {
    matcher: Matcher<S>,
}

impl<S: CorpusSource> Responder<S> {
    pub fn new(source: S) -> Self {
        Self {
            matcher: Matcher::new(source),
        }
    }

    pub fn matcher(&self) -> &Matcher<S> {
        &self.matcher
    }

    /// Reply text for a chat message.
    pub fn respond(&self, query: &str) -> String {
        self.reply(query).text
    }

    /// Reply for a chat message, tagged with the tier that produced it.
    pub fn reply(&self, query: &str) -> Reply {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.matcher.best_candidate(query)));

        match outcome {
            Ok(Ok(candidate)) => select(candidate),
            Ok(Err(e)) if e.is_degraded() => {
                tracing::debug!(error = %e, "no FAQ corpus; using default reply");
                Reply::new(Tier::Default, DEFAULT_REPLY)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "FAQ lookup failed");
                Reply::new(Tier::Apology, APOLOGY_REPLY)
            }
            Err(_) => {
                tracing::error!("FAQ lookup panicked");
                Reply::new(Tier::Apology, APOLOGY_REPLY)
            }
        }
    }
}

fn select(candidate: Option<Candidate>) -> Reply {
    let Some(candidate) = candidate else {
        return Reply::new(Tier::Default, DEFAULT_REPLY);
    };

    let tier = if candidate.accepted_at(PRIMARY_THRESHOLD) {
        Tier::Primary
    } else if candidate.accepted_at(FALLBACK_THRESHOLD) {
        Tier::Fallback
    } else {
        tracing::debug!(score = candidate.score, "best FAQ candidate below fallback threshold");
        return Reply::new(Tier::Default, DEFAULT_REPLY);
    };

    tracing::debug!(
        tier = tier.as_str(),
        score = candidate.score,
        category = %candidate.category,
        "FAQ answer selected"
    );
    Reply::new(tier, candidate.answer)
}
