//! Final filtering and type casting.

use polars::prelude::{BooleanChunked, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use lifexp_common::{any_to_string, any_to_whole_i64, column_strings};
use lifexp_model::{
    AGE, FinalTable, LongTable, PipelineError, REGION, Region, Result, SEX,
    SplitTable, UNIT, VALUE, YEAR,
};

/// Finalizes the reshaped table of the wide pipeline.
pub fn finalize_long(table: LongTable, region: Region) -> Result<FinalTable> {
    finalize_frame(table.into_frame(), region)
}

/// Finalizes the discrete pipeline's split table, which already carries
/// `region`, `year` and `value`.
pub fn finalize_discrete(table: SplitTable, region: Region) -> Result<FinalTable> {
    finalize_frame(table.into_frame(), region)
}

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })
}

/// Drops incomplete rows, keeps `region`, casts `year` to `i64` and orders
/// columns as `unit, sex, age, region, year, value`.
///
/// A row is incomplete when `value` is null or NaN, or any other output column
/// is null. Surviving rows keep their input order. A bad year is reported with
/// its row index in the input table.
fn finalize_frame(df: DataFrame, region: Region) -> Result<FinalTable> {
    let input_rows = df.height();

    let mut keep = vec![true; input_rows];
    for name in [UNIT, SEX, AGE, YEAR] {
        let column = required(&df, name)?;
        if column.null_count() == 0 {
            continue;
        }
        for (flag, cell) in keep.iter_mut().zip(column_strings(column)?) {
            *flag &= cell.is_some();
        }
    }
    let values = required(&df, VALUE)?.cast(&DataType::Float64)?;
    for (flag, cell) in keep.iter_mut().zip(values.f64()?.into_iter()) {
        *flag &= cell.is_some_and(|v| !v.is_nan());
    }
    let complete = keep.iter().filter(|flag| **flag).count();
    for (flag, cell) in keep.iter_mut().zip(column_strings(required(&df, REGION)?)?) {
        *flag &= cell.as_deref() == Some(region.code());
    }

    let kept_rows: Vec<usize> = keep
        .iter()
        .enumerate()
        .filter_map(|(row, flag)| flag.then_some(row))
        .collect();
    let filtered = df.filter(&BooleanChunked::new("keep".into(), keep))?;

    let year_column = required(&filtered, YEAR)?;
    let mut years = Vec::with_capacity(filtered.height());
    for (idx, &row) in kept_rows.iter().enumerate() {
        let cell = year_column.get(idx)?;
        match any_to_whole_i64(cell.clone()) {
            Some(year) => years.push(year),
            None => {
                return Err(PipelineError::InvalidYear {
                    row,
                    value: any_to_string(cell),
                });
            }
        }
    }
    let value_column = required(&filtered, VALUE)?.cast(&DataType::Float64)?;

    let mut out = filtered.select([UNIT, SEX, AGE, REGION])?;
    out.with_column(Series::new(YEAR.into(), years).into_column())?;
    out.with_column(value_column)?;

    debug!(
        region = region.code(),
        input_rows,
        complete_rows = complete,
        rows = out.height(),
        "filtered to region"
    );
    Ok(FinalTable::new(out))
}

#[cfg(test)]
mod tests {
    use polars::prelude::AnyValue;

    use super::*;
    use lifexp_model::{ErrorKind, OUTPUT_COLUMNS};

    fn long(
        regions: Vec<&str>,
        years: Vec<&str>,
        values: Vec<Option<f64>>,
    ) -> LongTable {
        let n = regions.len();
        LongTable::new(
            DataFrame::new(vec![
                Series::new(UNIT.into(), vec!["YR"; n]).into_column(),
                Series::new(SEX.into(), vec!["F"; n]).into_column(),
                Series::new(AGE.into(), vec!["Y1"; n]).into_column(),
                Series::new(REGION.into(), regions).into_column(),
                Series::new(YEAR.into(), years).into_column(),
                Series::new(VALUE.into(), values).into_column(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn keeps_only_requested_region_with_values() {
        let table = long(
            vec!["PT", "AT", "PT", "PT"],
            vec!["2021", "2021", "2020", "2019"],
            vec![None, Some(81.0), Some(80.5), Some(80.1)],
        );

        let result = finalize_long(table, Region::Portugal).unwrap();

        assert_eq!(result.height(), 2);
        assert_eq!(result.column_names(), OUTPUT_COLUMNS.to_vec());
        let frame = result.frame();
        assert_eq!(frame.column(YEAR).unwrap().dtype(), &DataType::Int64);
        assert_eq!(frame.column(YEAR).unwrap().get(0).unwrap(), AnyValue::Int64(2020));
        assert_eq!(frame.column(YEAR).unwrap().get(1).unwrap(), AnyValue::Int64(2019));
        assert_eq!(frame.column(VALUE).unwrap().get(0).unwrap(), AnyValue::Float64(80.5));
    }

    #[test]
    fn region_match_is_exact() {
        let table = long(
            vec!["pt", "PT ", "EU27_2020"],
            vec!["2020", "2020", "2020"],
            vec![Some(1.0), Some(2.0), Some(3.0)],
        );

        let result = finalize_long(table, Region::Portugal).unwrap();
        assert_eq!(result.height(), 0);
        assert_eq!(result.column_names(), OUTPUT_COLUMNS.to_vec());
    }

    #[test]
    fn bad_year_in_kept_row_is_value_error() {
        let table = long(vec!["PT"], vec!["20x0"], vec![Some(80.0)]);

        let err = finalize_long(table, Region::Portugal).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn bad_year_reports_input_row() {
        let table = long(
            vec!["AT", "PT", "PT", "PT"],
            vec!["2021", "2021", "2020", "20x0"],
            vec![Some(81.0), None, Some(80.5), Some(80.1)],
        );

        let err = finalize_long(table, Region::Portugal).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidYear { row: 3, ref value } if value == "20x0"
        ));
    }

    #[test]
    fn bad_year_in_dropped_row_is_ignored() {
        let table = long(
            vec!["AT", "PT", "PT"],
            vec!["20x0", "total", "2020"],
            vec![Some(80.0), None, Some(79.0)],
        );

        let result = finalize_long(table, Region::Portugal).unwrap();
        assert_eq!(result.height(), 1);
    }

    #[test]
    fn nan_values_are_dropped() {
        let table = long(
            vec!["PT", "PT"],
            vec!["2020", "2019"],
            vec![Some(f64::NAN), Some(79.0)],
        );

        let result = finalize_long(table, Region::Portugal).unwrap();
        assert_eq!(result.height(), 1);
    }

    #[test]
    fn discrete_integer_years_pass_through() {
        let split = SplitTable::new(
            DataFrame::new(vec![
                Series::new(UNIT.into(), vec!["YR", "YR"]).into_column(),
                Series::new(SEX.into(), vec!["Y", "Y"]).into_column(),
                Series::new(AGE.into(), vec!["Y_LT1", "Y_LT1"]).into_column(),
                Series::new(REGION.into(), vec!["BE", "PT"]).into_column(),
                Series::new(YEAR.into(), vec![2020i64, 2020]).into_column(),
                Series::new(VALUE.into(), vec![Some(81.0), Some(80.0)]).into_column(),
            ])
            .unwrap(),
        );

        let result = finalize_discrete(split, Region::Belgium).unwrap();
        assert_eq!(result.height(), 1);
        assert_eq!(
            result.frame().column(YEAR).unwrap().get(0).unwrap(),
            AnyValue::Int64(2020)
        );
    }
}
