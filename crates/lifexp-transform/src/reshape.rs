//! Wide-to-long reshaping.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use lifexp_common::column_strings;
use lifexp_model::{LongTable, NormalizedTable, PipelineError, Result, VALUE, YEAR};

/// Unpivots year columns into `year` and `value` columns.
///
/// Output rows are grouped by year column (in the given order), and within
/// each group follow the input row order. Identifier columns come first, in
/// the given order, followed by `year` (the column header text) and `value`.
/// The result always has `height * year_columns.len()` rows.
pub fn unpivot_years<I: AsRef<str>, Y: AsRef<str>>(
    table: NormalizedTable,
    id_columns: &[I],
    year_columns: &[Y],
) -> Result<LongTable> {
    let df = table.into_frame();
    let height = df.height();
    let total = height * year_columns.len();

    let lookup = |name: &str| {
        df.column(name).map_err(|_| PipelineError::MissingColumn {
            column: name.to_string(),
        })
    };

    let mut columns: Vec<Column> = Vec::with_capacity(id_columns.len() + 2);
    for id in id_columns {
        let id = id.as_ref();
        let values = column_strings(lookup(id)?)?;
        let mut repeated: Vec<Option<String>> = Vec::with_capacity(total);
        for _ in year_columns {
            repeated.extend(values.iter().cloned());
        }
        columns.push(Series::new(id.into(), repeated).into_column());
    }

    let mut years: Vec<String> = Vec::with_capacity(total);
    let mut values: Vec<Option<f64>> = Vec::with_capacity(total);
    for year in year_columns {
        let year = year.as_ref();
        let cells = lookup(year)?.cast(&DataType::Float64)?;
        years.extend(std::iter::repeat_n(year.to_string(), height));
        values.extend(cells.f64()?.into_iter());
    }
    columns.push(Series::new(YEAR.into(), years).into_column());
    columns.push(Series::new(VALUE.into(), values).into_column());

    let long = DataFrame::new(columns)?;
    debug!(
        input_rows = height,
        year_columns = year_columns.len(),
        rows = long.height(),
        "unpivoted year columns"
    );
    Ok(LongTable::new(long))
}
