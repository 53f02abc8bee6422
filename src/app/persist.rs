use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::state::{Theme, ViewMode};

/// The two remembered flags, stored as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedPrefs {
    pub theme: String,
    pub view_mode: String,
}

impl Default for SavedPrefs {
    fn default() -> Self {
        Self {
            theme: Theme::default().as_str().to_string(),
            view_mode: ViewMode::default().as_str().to_string(),
        }
    }
}

impl SavedPrefs {
    pub fn new(theme: Theme, view_mode: ViewMode) -> Self {
        Self {
            theme: theme.as_str().to_string(),
            view_mode: view_mode.as_str().to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_label(&self.theme)
    }

    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_label(&self.view_mode)
    }
}

pub fn prefs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/songsearch/prefs.json")
}

pub fn save(prefs: &SavedPrefs) -> anyhow::Result<()> {
    save_to(&prefs_path(), prefs)
}

pub fn save_to(path: &Path, prefs: &SavedPrefs) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load() -> Option<SavedPrefs> {
    load_from(&prefs_path())
}

/// `None` when nothing was saved yet or the file is unreadable.
pub fn load_from(path: &Path) -> Option<SavedPrefs> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(prefs) => Some(prefs),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring corrupt preferences");
            None
        }
    }
}
