//! Source and output locations.
//!
//! File names are fixed; only the base directory (and the output path) can be
//! overridden, which the CLI and tests use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::SourceFormat;
use crate::region::Region;

/// Default directory holding inputs and outputs.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Wide tab-separated Eurostat extract.
pub const TSV_FILE_NAME: &str = "eu_life_expectancy_raw.tsv";

/// Archive holding the long-format JSON extract.
pub const ZIP_FILE_NAME: &str = "eurostat_life_expect.zip";

/// JSON member inside [`ZIP_FILE_NAME`].
pub const ZIP_MEMBER_NAME: &str = "eurostat_life_expect.json";

/// Locations of the raw sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data_dir: PathBuf,
    pub tsv_file: String,
    pub zip_file: String,
    pub zip_member: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tsv_file: TSV_FILE_NAME.to_string(),
            zip_file: ZIP_FILE_NAME.to_string(),
            zip_member: ZIP_MEMBER_NAME.to_string(),
        }
    }
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn tsv_path(&self) -> PathBuf {
        self.data_dir.join(&self.tsv_file)
    }

    pub fn zip_path(&self) -> PathBuf {
        self.data_dir.join(&self.zip_file)
    }

    /// Path of the raw source read for `format`.
    pub fn source_path(&self, format: SourceFormat) -> PathBuf {
        match format {
            SourceFormat::Csv => self.tsv_path(),
            SourceFormat::Zip => self.zip_path(),
        }
    }

    /// Default output file for `region` inside the data directory.
    pub fn output_path(&self, region: Region) -> PathBuf {
        output_path(&self.data_dir, region)
    }
}

/// `<dir>/<region code in lowercase>_life_expectancy.csv`
pub fn output_path(dir: &Path, region: Region) -> PathBuf {
    dir.join(format!(
        "{}_life_expectancy.csv",
        region.code().to_lowercase()
    ))
}
