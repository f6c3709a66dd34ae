//! Reference data loading
//!
//! `rates.json` and `quest_data.json` live side by side in one data
//! directory. Both files are required.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, Result};
use crate::quest::PrerequisiteCatalog;
use crate::rates::RateTable;

pub const RATES_FILE: &str = "rates.json";
pub const QUEST_DATA_FILE: &str = "quest_data.json";

/// Read-only reference tables
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub rates: RateTable,
    pub catalog: PrerequisiteCatalog,
}

impl ReferenceData {
    /// Load both tables from a directory
    pub fn load_from_directory(data_dir: &Path) -> Result<Self> {
        info!("Loading reference data from {:?}", data_dir);

        let rates = RateTable::from_json_str(&read_file(&data_dir.join(RATES_FILE))?)?;
        info!("Loaded rate tables for {} skills", rates.len());

        let catalog =
            PrerequisiteCatalog::from_json_str(&read_file(&data_dir.join(QUEST_DATA_FILE))?)?;
        info!("Loaded {} quest prerequisite entries", catalog.len());

        Ok(Self { rates, catalog })
    }

    /// Load only the rate tables
    pub fn load_rates(data_dir: &Path) -> Result<RateTable> {
        RateTable::from_json_str(&read_file(&data_dir.join(RATES_FILE))?)
    }

    /// Load only the prerequisite catalog
    pub fn load_catalog(data_dir: &Path) -> Result<PrerequisiteCatalog> {
        PrerequisiteCatalog::from_json_str(&read_file(&data_dir.join(QUEST_DATA_FILE))?)
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: PathBuf::from(path),
        source,
    })
}
