use eyre::WrapErr;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub const DATA_FILE: &str = "studentMarks.txt";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Data files to probe, in order.
    pub candidates: Vec<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let mut candidates = Vec::new();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(DATA_FILE));
        }
        candidates.push(PathBuf::from(DATA_FILE));
        Self { candidates }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> eyre::Result<Config> {
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot read configuration file {}", file_name.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))
    }

    pub fn parse(content: &str) -> eyre::Result<Config> {
        Ok(toml::from_str(content)?)
    }

    /// Load `file_name` if it exists, use the default configuration
    /// otherwise.
    pub fn load_or_default(file_name: &Path) -> eyre::Result<Config> {
        if file_name.exists() {
            Self::load(file_name)
        } else {
            debug!(file = %file_name.display(), "no configuration file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Return the first existing path among `candidates`.
pub fn resolve_data_path(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .inspect(|p| trace!(candidate = %p.display(), "probing data file"))
        .find(|p| p.exists())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_candidates() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.store.candidates.last(), Some(&PathBuf::from(DATA_FILE)));
        assert!(!config.store.candidates.is_empty());
    }

    #[test]
    fn test_candidates_from_toml() {
        let config = Config::parse(
            r#"
            [store]
            candidates = ["/mnt/data/studentMarks.txt", "marks.txt"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.store.candidates,
            [PathBuf::from("/mnt/data/studentMarks.txt"), PathBuf::from("marks.txt")]
        );
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::parse("[store]\npath = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rmarks.toml");
        assert!(Config::load(&file).is_err());
        assert!(Config::load_or_default(&file).is_ok());
        std::fs::write(&file, "[store]\ncandidates = [\"marks.txt\"]\n").unwrap();
        let config = Config::load_or_default(&file).unwrap();
        assert_eq!(config.store.candidates, [PathBuf::from("marks.txt")]);
    }

    #[test]
    fn test_resolve_first_existing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "").unwrap();
        std::fs::write(&second, "").unwrap();
        assert_eq!(
            resolve_data_path(&[missing.clone(), first.clone(), second.clone()]),
            Some(first)
        );
        assert_eq!(resolve_data_path(&[second.clone(), missing.clone()]), Some(second));
        assert_eq!(resolve_data_path(&[missing]), None);
        assert_eq!(resolve_data_path(&[]), None);
    }
}
