use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::item::{InventoryItem, SoldRecord};
use crate::paths::write_text_file;

/// The whole contents of `inventory_data.json`.
///
/// Missing keys load as their defaults so a hand-edited file still opens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryData {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub sold_items: Vec<SoldRecord>,
}

impl InventoryData {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(InventoryData::default());
        }
        let raw = fs::read_to_string(path)?;
        let data = serde_json::from_str::<InventoryData>(raw.as_str())?;
        Ok(data)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self)?;
        write_text_file(path, content.as_str())
    }
}
