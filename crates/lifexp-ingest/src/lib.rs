//! Raw data loading for the life expectancy cleaner.
//!
//! Two sources are supported, each behind the [`DataLoader`] trait:
//!
//! - **TSV**: the wide Eurostat extract, read with Polars, every column as text
//! - **ZIP**: a JSON member (array of objects) inside an archive
//!
//! # Example
//!
//! ```ignore
//! use lifexp_ingest::loader_for;
//! use lifexp_model::{SourceConfig, SourceFormat};
//!
//! let loader = loader_for(SourceFormat::Csv, &SourceConfig::default());
//! let raw = loader.load()?;
//! ```

mod archive;
mod json;
mod loader;
mod tsv;

pub use archive::read_zip_json_member;
pub use json::{parse_records, records_to_frame};
pub use loader::{DataLoader, TsvLoader, ZipJsonLoader, loader_for};
pub use tsv::{read_tsv_table, validate_encoding};
