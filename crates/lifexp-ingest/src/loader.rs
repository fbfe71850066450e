//! Source loading strategies.

use std::path::PathBuf;

use lifexp_model::{RawTable, Result, SourceConfig, SourceFormat};

use crate::archive::read_zip_json_member;
use crate::tsv::read_tsv_table;

/// Loads a raw source into a [`RawTable`].
pub trait DataLoader {
    /// Reads the source. Each call opens and releases its own file handle.
    fn load(&self) -> Result<RawTable>;

    /// Human-readable source locator for logs and summaries.
    fn source(&self) -> String;
}

/// Wide tab-separated extract.
#[derive(Debug, Clone)]
pub struct TsvLoader {
    pub path: PathBuf,
}

impl TsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataLoader for TsvLoader {
    fn load(&self) -> Result<RawTable> {
        read_tsv_table(&self.path)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// JSON member of a ZIP archive.
#[derive(Debug, Clone)]
pub struct ZipJsonLoader {
    pub archive: PathBuf,
    pub member: String,
}

impl ZipJsonLoader {
    pub fn new(archive: impl Into<PathBuf>, member: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            member: member.into(),
        }
    }
}

impl DataLoader for ZipJsonLoader {
    fn load(&self) -> Result<RawTable> {
        read_zip_json_member(&self.archive, &self.member)
    }

    fn source(&self) -> String {
        format!("{}!{}", self.archive.display(), self.member)
    }
}

/// Picks the loader for `format` using the locations in `config`.
pub fn loader_for(format: SourceFormat, config: &SourceConfig) -> Box<dyn DataLoader> {
    match format {
        SourceFormat::Csv => Box::new(TsvLoader::new(config.tsv_path())),
        SourceFormat::Zip => Box::new(ZipJsonLoader::new(
            config.zip_path(),
            config.zip_member.clone(),
        )),
    }
}
