//! `faq ask` and `faq match` commands.

use anyhow::{bail, Result};

use barangay_faq_core::matcher::{Candidate, Matcher, MatchResult};
use barangay_faq_core::responder::Responder;

use crate::config::Config;
use crate::corpus::FileCorpusProvider;

/// Print the chatbot reply for a message, exactly as the chat endpoint
/// would return it.
pub fn run_ask(config: &Config, message: &str) -> Result<()> {
    let responder = Responder::new(FileCorpusProvider::from_config(config));
    println!("{}", responder.respond(message));
    Ok(())
}

/// Run a single thresholded lookup.
///
/// With `explain`, the winning candidate's score breakdown is printed
/// before the answer, and a corpus failure is reported as an error instead
/// of a silent "No match.".
pub fn run_match(config: &Config, query: &str, threshold: f64, explain: bool) -> Result<()> {
    validate_threshold(threshold)?;

    let matcher = Matcher::new(FileCorpusProvider::from_config(config));

    if !explain {
        match matcher.find_best_match(query, threshold) {
            MatchResult::Found(answer) => println!("{}", answer),
            MatchResult::NotFound => println!("No match."),
        }
        return Ok(());
    }

    let candidate = matcher.best_candidate(query)?;
    match candidate {
        Some(c) => {
            print_explanation(&c, threshold);
            if c.accepted_at(threshold) {
                println!("{}", c.answer);
            } else {
                println!("No match.");
            }
        }
        None => {
            println!("No candidate scored above zero.");
            println!("No match.");
        }
    }

    Ok(())
}

pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("threshold must be in [0.0, 1.0], got {}", threshold);
    }
    Ok(())
}

fn print_explanation(c: &Candidate, threshold: f64) {
    println!("category:   {}", c.category);
    println!("question:   {}", c.question);
    if c.exact {
        println!("score:      exact match");
    } else {
        match c.word_score {
            Some(w) => println!(
                "score:      {:.4} (similarity {:.4}, keywords {:.4})",
                c.score, c.similarity, w
            ),
            None => println!("score:      {:.4} (similarity {:.4})", c.score, c.similarity),
        }
    }
    println!("threshold:  {}", threshold);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(0.3).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(1.5).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }
}
