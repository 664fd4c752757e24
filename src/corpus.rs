//! File-backed FAQ corpus provider.
//!
//! [`FileCorpusProvider`] reads the JSON corpus named by `[corpus].path`
//! the first time it is asked for it and caches the parsed result for the
//! life of the process. Only successful loads are cached: if the file is
//! missing or malformed, the next call tries again.
//!
//! The first load is serialized behind a mutex so concurrent first
//! callers parse the file once. After that, reads go through a
//! [`OnceLock`] and take no lock.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use barangay_faq_core::models::Corpus;
use barangay_faq_core::source::{CorpusError, CorpusSource};

use crate::config::Config;

pub struct FileCorpusProvider {
    path: PathBuf,
    cached: OnceLock<Arc<Corpus>>,
    load_lock: Mutex<()>,
}

impl FileCorpusProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.corpus.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Corpus, CorpusError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| CorpusError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        Corpus::from_json(&text)
    }
}

impl CorpusSource for FileCorpusProvider {
    fn corpus(&self) -> Result<Arc<Corpus>, CorpusError> {
        if let Some(corpus) = self.cached.get() {
            return Ok(corpus.clone());
        }

        let _guard = self
            .load_lock
            .lock()
            .map_err(|_| CorpusError::Internal("corpus load lock poisoned".to_string()))?;

        // Another caller may have finished loading while we waited.
        if let Some(corpus) = self.cached.get() {
            return Ok(corpus.clone());
        }

        match self.read() {
            Ok(corpus) => {
                tracing::info!(
                    path = %self.path.display(),
                    categories = corpus.category_count(),
                    questions = corpus.entry_count(),
                    "loaded FAQ corpus"
                );
                let corpus = self.cached.get_or_init(|| Arc::new(corpus));
                Ok(corpus.clone())
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "FAQ corpus not loaded");
                Err(e)
            }
        }
    }

    fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    const CORPUS: &str = r#"{
        "categories": [
            {"name": "General", "questions": [
                {"question": "What is a barangay?", "answer": "The smallest local government unit."}
            ]},
            {"name": "Requests", "questions": [
                {"question": "How do I request a barangay clearance?", "answer": "File a request online."},
                {"question": "How long does processing take?", "answer": "Three working days."}
            ]}
        ]
    }"#;

    #[test]
    fn test_loads_and_reports_counts() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.json");
        fs::write(&path, CORPUS).unwrap();

        let provider = FileCorpusProvider::new(&path);
        assert!(!provider.is_loaded());
        let corpus = provider.corpus().unwrap();
        assert_eq!(corpus.category_count(), 2);
        assert_eq!(corpus.entry_count(), 3);
        assert!(provider.is_loaded());
    }

    #[test]
    fn test_success_is_cached() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.json");
        fs::write(&path, CORPUS).unwrap();

        let provider = FileCorpusProvider::new(&path);
        let first = provider.corpus().unwrap();
        fs::remove_file(&path).unwrap();
        let second = provider.corpus().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_is_unavailable_and_not_cached() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.json");

        let provider = FileCorpusProvider::new(&path);
        assert!(matches!(provider.corpus(), Err(CorpusError::Unavailable(_))));
        assert!(!provider.is_loaded());

        fs::write(&path, CORPUS).unwrap();
        assert_eq!(provider.corpus().unwrap().entry_count(), 3);
    }

    #[test]
    fn test_malformed_file_is_not_cached() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.json");
        fs::write(&path, "{ not json").unwrap();

        let provider = FileCorpusProvider::new(&path);
        assert!(matches!(provider.corpus(), Err(CorpusError::Malformed(_))));

        fs::write(&path, CORPUS).unwrap();
        assert!(provider.corpus().is_ok());
    }

    #[test]
    fn test_concurrent_first_callers_share_one_corpus() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("faq.json");
        fs::write(&path, CORPUS).unwrap();

        let provider = Arc::new(FileCorpusProvider::new(&path));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let p = provider.clone();
                thread::spawn(move || p.corpus().unwrap())
            })
            .collect();
        let loaded: Vec<Arc<Corpus>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for c in &loaded[1..] {
            assert!(Arc::ptr_eq(&loaded[0], c));
        }
    }

    #[test]
    fn test_from_config_uses_corpus_path() {
        let mut cfg = Config::minimal();
        cfg.corpus.path = PathBuf::from("/srv/bla/faq.json");
        let provider = FileCorpusProvider::from_config(&cfg);
        assert_eq!(provider.path(), Path::new("/srv/bla/faq.json"));
    }
}
