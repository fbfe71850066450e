//! Core types for the life expectancy cleaner.
//!
//! - **region**: the closed set of Eurostat `geo` codes
//! - **format**: source format selector (`csv` or `zip`)
//! - **table**: typed pipeline stages over Polars DataFrames
//! - **config**: fixed source and output locations
//! - **error**: the shared error taxonomy

pub mod config;
pub mod error;
pub mod format;
pub mod region;
pub mod table;

pub use config::{
    DEFAULT_DATA_DIR, SourceConfig, TSV_FILE_NAME, ZIP_FILE_NAME, ZIP_MEMBER_NAME, output_path,
};
pub use error::{ErrorKind, PipelineError, Result};
pub use format::SourceFormat;
pub use region::Region;
pub use table::{
    AGE, COMPOUND_ID_COLUMN, FinalTable, ID_COLUMNS, LongTable, NormalizedTable, OUTPUT_COLUMNS,
    REGION, RawTable, SEX, SplitTable, UNIT, VALUE, YEAR,
};
