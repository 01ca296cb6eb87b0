//! Persist the best score to disk (XDG config or ~/.config/gravity-2048).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const FILENAME: &str = "best_score";
const APP_DIR: &str = "gravity-2048";

/// Per-user data directory: `$XDG_CONFIG_HOME/gravity-2048`, else `~/.config/gravity-2048`.
pub fn config_dir() -> PathBuf {
    config_dir_from(std::env::var("XDG_CONFIG_HOME").ok(), std::env::var("HOME").ok())
}

fn config_dir_from(xdg: Option<String>, home: Option<String>) -> PathBuf {
    let base = match xdg.filter(|x| !x.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => home
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    base.join(APP_DIR)
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot read best score from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write best score to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("best score file {} is corrupt: {content:?}", path.display())]
    Corrupt { path: PathBuf, content: String },
}

/// Best score file: a single integer on one line.
#[derive(Debug, Clone)]
pub struct BestScore {
    path: PathBuf,
}

impl BestScore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored best score; 0 if nothing was saved yet.
    pub fn load(&self) -> Result<u64, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse::<u64>()
            .map_err(|_| PersistenceError::Corrupt {
                path: self.path.clone(),
                content: trimmed.chars().take(32).collect(),
            })
    }

    /// Save `score` if it beats the stored one. Returns true when the file was written.
    pub fn record(&self, score: u64) -> Result<bool, PersistenceError> {
        if score <= self.load()? {
            return Ok(false);
        }
        self.save(score)?;
        Ok(true)
    }

    /// Delete the saved score. Nothing saved is not an error.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, score: u64) -> Result<(), PersistenceError> {
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut f = fs::File::create(&self.path)?;
            writeln!(f, "{}", score)
        };
        write().map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_resolution() {
        assert_eq!(
            config_dir_from(Some("/xdg".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/gravity-2048")
        );
        assert_eq!(
            config_dir_from(Some(String::new()), Some("/home/u".into())),
            PathBuf::from("/home/u/.config/gravity-2048")
        );
        assert_eq!(config_dir_from(None, None), PathBuf::from("./gravity-2048"));
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = BestScore::in_dir(&dir.path().join("nested"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_record_only_strictly_greater() {
        let dir = tempfile::tempdir().unwrap();
        let store = BestScore::in_dir(&dir.path().join("nested"));

        assert!(store.record(120).unwrap());
        assert_eq!(store.load().unwrap(), 120);
        assert!(!store.record(120).unwrap());
        assert!(!store.record(80).unwrap());
        assert_eq!(store.load().unwrap(), 120);
        assert!(store.record(121).unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "121\n");
    }

    #[test]
    fn test_zero_score_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = BestScore::in_dir(dir.path());
        assert!(!store.record(0).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = BestScore::in_dir(dir.path());
        fs::write(store.path(), "lots\n").unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Corrupt { .. })));
        assert!(store.record(10).is_err());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "lots\n");
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = BestScore::in_dir(dir.path());
        store.clear().unwrap();
        store.record(64).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        fs::create_dir(dir.path().join(FILENAME)).unwrap();
        let store = BestScore::in_dir(dir.path());
        assert!(matches!(store.load(), Err(PersistenceError::Read { .. })));
    }
}
