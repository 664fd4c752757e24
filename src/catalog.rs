//! `faq categories` and `faq check` commands.

use anyhow::{Context, Result};

use barangay_faq_core::source::CorpusSource;

use crate::config::Config;
use crate::corpus::FileCorpusProvider;

/// List every category with its question count, in corpus order.
pub fn list_categories(config: &Config) -> Result<()> {
    let provider = FileCorpusProvider::from_config(config);
    let corpus = provider.corpus()?;

    if corpus.categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    let width = corpus
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    for category in &corpus.categories {
        println!(
            "{:<width$}  {} questions",
            category.name,
            category.questions.len(),
            width = width
        );
    }

    Ok(())
}

/// Load the corpus once and report whether it is usable.
pub fn run_check(config: &Config) -> Result<()> {
    let provider = FileCorpusProvider::from_config(config);
    let corpus = provider
        .corpus()
        .with_context(|| format!("corpus check failed for {}", provider.path().display()))?;

    println!("corpus: {}", provider.path().display());
    println!("categories: {}", corpus.category_count());
    println!("questions: {}", corpus.entry_count());
    println!("ok");

    Ok(())
}
