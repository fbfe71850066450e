//! Year-cell normalization.
//!
//! Eurostat publishes figures as text with optional flag letters after a space
//! (`"81.3 e"` for estimated) and `:` for "not available".

use polars::prelude::{IntoColumn, NamedFrom, Series};
use tracing::debug;

use lifexp_common::column_strings;
use lifexp_model::{ID_COLUMNS, NormalizedTable, PipelineError, Result, SplitTable};

/// Marker Eurostat uses for a missing observation.
pub const MISSING_SENTINEL: &str = ":";

/// Converts one year cell to a nullable number.
///
/// 1. trim; empty text is missing
/// 2. `:` (alone or followed by a flag, e.g. `": c"`) is missing
/// 3. parse the whole text
/// 4. otherwise parse only the first space-separated token
///
/// Returns the trimmed text as the error when step 4 fails too.
///
/// # Examples
///
/// ```
/// use lifexp_transform::normalize_cell;
///
/// assert_eq!(normalize_cell(Some("81.3")), Ok(Some(81.3)));
/// assert_eq!(normalize_cell(Some("81.3 e")), Ok(Some(81.3)));
/// assert_eq!(normalize_cell(Some(":")), Ok(None));
/// assert!(normalize_cell(Some("abc")).is_err());
/// ```
pub fn normalize_cell(cell: Option<&str>) -> std::result::Result<Option<f64>, String> {
    let Some(raw) = cell else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
        return Ok(None);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(Some(value));
    }
    let first = trimmed.split(' ').next().unwrap_or(trimmed);
    if first == MISSING_SENTINEL {
        return Ok(None);
    }
    first
        .parse::<f64>()
        .map(Some)
        .map_err(|_| trimmed.to_string())
}

/// Columns of a split table that hold yearly values, in table order.
pub fn year_columns(table: &SplitTable) -> Vec<String> {
    table
        .column_names()
        .into_iter()
        .filter(|name| !ID_COLUMNS.contains(&name.as_str()))
        .collect()
}

/// Normalizes every cell of `year_columns`, failing on the first cell that
/// cannot be read as a number.
pub fn normalize_values<S: AsRef<str>>(
    table: SplitTable,
    year_columns: &[S],
) -> Result<NormalizedTable> {
    let mut df = table.into_frame();
    for name in year_columns {
        let name = name.as_ref();
        let column = df.column(name).map_err(|_| PipelineError::MissingColumn {
            column: name.to_string(),
        })?;
        let cells = column_strings(column)?;
        let mut values = Vec::with_capacity(cells.len());
        for (row, cell) in cells.iter().enumerate() {
            let value = normalize_cell(cell.as_deref()).map_err(|value| {
                PipelineError::InvalidNumber {
                    column: name.to_string(),
                    row,
                    value,
                }
            })?;
            values.push(value);
        }
        df.with_column(Series::new(name.into(), values).into_column())?;
    }

    debug!(
        rows = df.height(),
        year_columns = year_columns.len(),
        "normalized year values"
    );
    Ok(NormalizedTable::new(df))
}
