//! TOML configuration.
//!
//! ```toml
//! [corpus]
//! path = "../data/faq.json"
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! ```
//!
//! A relative `corpus.path` is resolved against the directory containing
//! the config file, so a deployment can move as a unit.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Config {
    /// Configuration used when no config file is present.
    pub fn minimal() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("./data/faq.json"),
            },
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.corpus.path.as_os_str().is_empty() {
        anyhow::bail!("corpus.path must not be empty");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.corpus.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.corpus.path = dir.join(&config.corpus.path);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("faq.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_relative_corpus_path_resolves_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[corpus]\npath = \"data/faq.json\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.corpus.path, tmp.path().join("data/faq.json"));
        assert_eq!(cfg.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_absolute_corpus_path_kept() {
        let tmp = TempDir::new().unwrap();
        let abs = tmp.path().join("elsewhere.json");
        let path = write_config(
            &tmp,
            &format!(
                "[corpus]\npath = \"{}\"\n\n[server]\nbind = \"0.0.0.0:9000\"\n",
                abs.display()
            ),
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.corpus.path, abs);
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_corpus_path_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[corpus]\npath = \"\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("corpus.path"));
    }

    #[test]
    fn test_empty_bind_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[corpus]\npath = \"faq.json\"\n[server]\nbind = \" \"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_corpus_section_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[server]\nbind = \"127.0.0.1:1\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = load_config(Path::new("/nonexistent/faq.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/faq.toml"));
    }
}
