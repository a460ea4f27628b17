use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub default_query_name: String,
    pub default_folder_name: String,
    pub query_quick_close: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_query_name: "New query".to_string(),
            default_folder_name: "New folder".to_string(),
            query_quick_close: true,
        }
    }
}

impl Settings {
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)
    }
}

/// Writes to a sibling tmp file, then renames over the target so a crash
/// never leaves a half-written file behind.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;
    let tmp_path = path.with_extension("tmp");

    fs::create_dir_all(parent)?;
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;

    Ok(())
}
