use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::PreferencesError;

#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/mtg-deck-builder/preferences.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mtg-deck-builder")
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Re-reads the file before writing so the last writer wins per key.
    pub fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferencesError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::new(dir.path().join("nope.json"));

        assert_eq!(prefs.get("anything").unwrap(), None);
    }

    #[test]
    fn set_creates_parent_dirs_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::new(dir.path().join("nested").join("prefs.json"));

        prefs.set("theme", "light").unwrap();
        prefs.set("other", "x").unwrap();

        assert_eq!(prefs.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(prefs.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn last_write_wins_across_handles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let a = Preferences::new(&path);
        let b = Preferences::new(&path);

        a.set("theme", "light").unwrap();
        b.set("theme", "dark").unwrap();

        assert_eq!(a.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let err = Preferences::new(&path).get("theme").unwrap_err();
        assert!(matches!(err, PreferencesError::Parse(_)));
    }
}
