//! Tab-separated source reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, SerReader};
use tracing::debug;

use lifexp_model::{PipelineError, RawTable, Result};

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// Also surfaces a missing file as [`PipelineError::SourceNotFound`] before
/// Polars gets involved.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| PipelineError::from_io("open", path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| PipelineError::from_io("read", path, e))?;

    if bytes_read == 2 && (buffer == [0xFF, 0xFE] || buffer == [0xFE, 0xFF]) {
        return Err(PipelineError::Parse {
            path: path.to_path_buf(),
            message: "UTF-16 input is not supported, expected UTF-8".to_string(),
        });
    }
    Ok(())
}

/// Reads a tab-separated file into a [`RawTable`].
///
/// The header row is kept verbatim (no trimming) and every column is read as
/// text; empty fields load as null.
pub fn read_tsv_table(path: &Path) -> Result<RawTable> {
    validate_encoding(path)?;

    let parse_error = |e: polars::prelude::PolarsError| PipelineError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(b'\t'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read tsv source"
    );
    Ok(RawTable::new(df))
}
