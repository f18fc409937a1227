//! Where translation databases live on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::config::Config;

/// Environment variable overriding the translations directory.
pub const DATA_DIR_ENV: &str = "BEREA_DATA_DIR";

/// Resolve the translations directory: environment, then config, then the
/// platform data directory.
pub fn data_dir(config: &Config) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join("berea").join("translations"))
}

pub fn database_path(dir: &Path, translation: &str) -> PathBuf {
    dir.join(format!("{translation}.db"))
}

/// Names of the translation databases present in `dir`, sorted. A missing
/// directory simply has none.
pub fn downloaded_translations(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut translations = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "db") {
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                translations.push(name.to_string());
            }
        }
    }

    translations.sort();
    Ok(translations)
}

/// Translation names double as table prefixes, so only ASCII letters and
/// digits are allowed.
pub fn is_valid_translation_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downloaded_translations() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["KJV.db", "BSB.db", "notes.txt"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }

        assert_eq!(downloaded_translations(dir.path()).unwrap(), vec!["BSB", "KJV"]);
    }

    #[test]
    fn test_missing_dir_has_no_translations() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(downloaded_translations(&missing).unwrap().is_empty());
    }

    #[test]
    fn test_database_path() {
        assert_eq!(database_path(Path::new("/data"), "KJV"), PathBuf::from("/data/KJV.db"));
    }

    #[test]
    fn test_translation_names() {
        assert!(is_valid_translation_name("BSB"));
        assert!(is_valid_translation_name("UKJV"));
        assert!(!is_valid_translation_name(""));
        assert!(!is_valid_translation_name("KJV; DROP TABLE books"));
        assert!(!is_valid_translation_name("../KJV"));
    }
}
