use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const APP_FOLDER_NAME: &str = "StoreInventoryData";
pub const SETTINGS_FILE: &str = "settings.json";
pub const DATA_FILE: &str = "inventory_data.json";
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "inventory_log.txt";

/// Every file the application touches, derived from one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub root: PathBuf,
    pub settings_file: PathBuf,
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl StorePaths {
    /// `<base>/StoreInventoryData`
    pub fn under(base: &Path) -> Self {
        Self::from_root(base.join(APP_FOLDER_NAME))
    }

    pub fn from_root(root: PathBuf) -> Self {
        StorePaths {
            settings_file: root.join(SETTINGS_FILE),
            data_file: root.join(DATA_FILE),
            log_file: root.join(LOG_DIR).join(LOG_FILE),
            root,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.root.as_path())?;
        fs::create_dir_all(self.root.join(LOG_DIR))?;
        Ok(())
    }

    /// Higher means the directory looks like it holds real data.
    pub fn data_score(&self) -> i64 {
        if !self.root.exists() {
            return -1;
        }
        let mut score = 0_i64;
        if self.data_file.is_file() {
            score += 50;
            if let Ok(meta) = fs::metadata(self.data_file.as_path()) {
                score += ((meta.len() / 1024) as i64).min(10_000);
            }
        }
        if self.settings_file.is_file() {
            score += 10;
        }
        if self.log_file.is_file() {
            score += 5;
        }
        score
    }
}

pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
