//! Raw-to-split preprocessing strategies.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use lifexp_common::{any_to_f64, any_to_string, column_strings};
use lifexp_model::{
    AGE, COMPOUND_ID_COLUMN, ID_COLUMNS, PipelineError, REGION, RawTable, Result, SEX,
    SourceFormat, SplitTable, UNIT, VALUE,
};

/// Columns the long-format source must provide, in output order.
pub const DISCRETE_SOURCE_COLUMNS: [&str; 6] =
    ["unit", "sex", "age", "country", "year", "life_expectancy"];

const COUNTRY: &str = "country";
const LIFE_EXPECTANCY: &str = "life_expectancy";

/// Turns a [`RawTable`] into a [`SplitTable`].
pub trait Preprocessor {
    fn preprocess(&self, raw: RawTable) -> Result<SplitTable>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Splits the wide extract's `unit,sex,age,geo\time` column.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundColumnPreprocessor;

impl Preprocessor for CompoundColumnPreprocessor {
    fn preprocess(&self, raw: RawTable) -> Result<SplitTable> {
        split_compound_column(raw)
    }

    fn name(&self) -> &'static str {
        "compound"
    }
}

/// Selects and renames the long-format source's columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteColumnPreprocessor;

impl Preprocessor for DiscreteColumnPreprocessor {
    fn preprocess(&self, raw: RawTable) -> Result<SplitTable> {
        select_discrete_columns(raw)
    }

    fn name(&self) -> &'static str {
        "discrete"
    }
}

/// Picks the preprocessor matching a source format.
pub fn preprocessor_for(format: SourceFormat) -> Box<dyn Preprocessor> {
    match format {
        SourceFormat::Csv => Box::new(CompoundColumnPreprocessor),
        SourceFormat::Zip => Box::new(DiscreteColumnPreprocessor),
    }
}

fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })
}

/// Replaces the compound identifier column with `unit`, `sex`, `age` and
/// `region`, appended after the remaining columns, and trims every column name.
///
/// Every identifier must split on `,` into exactly four parts, and trimmed
/// column names must be unique and distinct from the identifier columns.
pub fn split_compound_column(raw: RawTable) -> Result<SplitTable> {
    let df = raw.into_frame();
    let cells = column_strings(require_column(&df, COMPOUND_ID_COLUMN)?)?;

    let mut parts: [Vec<String>; 4] = Default::default();
    for target in &mut parts {
        target.reserve(cells.len());
    }
    for (row, cell) in cells.iter().enumerate() {
        let Some(value) = cell else {
            return Err(PipelineError::NullIdentifier { row });
        };
        let pieces: Vec<&str> = value.split(',').collect();
        if pieces.len() != ID_COLUMNS.len() {
            return Err(PipelineError::CompoundSplit {
                row,
                value: value.clone(),
                parts: pieces.len(),
            });
        }
        for (target, piece) in parts.iter_mut().zip(pieces) {
            target.push(piece.to_string());
        }
    }

    let mut df = df.drop(COMPOUND_ID_COLUMN)?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut seen: BTreeSet<&str> = ID_COLUMNS.into_iter().collect();
    for name in &names {
        let trimmed = name.trim();
        if !seen.insert(trimmed) {
            return Err(PipelineError::DuplicateColumn {
                column: trimmed.to_string(),
            });
        }
    }
    for name in &names {
        let trimmed = name.trim();
        if trimmed != name.as_str() {
            df.rename(name, trimmed.into())?;
        }
    }

    let [units, sexes, ages, regions] = parts;
    for (name, values) in [(UNIT, units), (SEX, sexes), (AGE, ages), (REGION, regions)] {
        df.with_column(Series::new(name.into(), values).into_column())?;
    }

    debug!(
        rows = df.height(),
        columns = df.width(),
        "split compound identifier column"
    );
    Ok(SplitTable::new(df))
}

/// Keeps `unit, sex, age, country, year, life_expectancy`, renaming
/// `country` to `region` and `life_expectancy` to `value`.
///
/// `value` is coerced to `f64`; numeric text is parsed and anything else
/// non-null is rejected.
pub fn select_discrete_columns(raw: RawTable) -> Result<SplitTable> {
    let df = raw.into_frame();
    for column in DISCRETE_SOURCE_COLUMNS {
        require_column(&df, column)?;
    }

    let mut df = df.select(DISCRETE_SOURCE_COLUMNS)?;
    df.rename(COUNTRY, REGION.into())?;
    df.rename(LIFE_EXPECTANCY, VALUE.into())?;

    let values = coerce_values(df.column(VALUE)?)?;
    df.with_column(Series::new(VALUE.into(), values).into_column())?;

    debug!(
        rows = df.height(),
        columns = df.width(),
        "selected discrete columns"
    );
    Ok(SplitTable::new(df))
}

fn coerce_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let mut values = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        let cell = column.get(row)?;
        let value = match cell {
            AnyValue::Null => None,
            AnyValue::String(s) if s.trim().is_empty() => None,
            other => {
                let text = any_to_string(other.clone());
                match any_to_f64(other) {
                    Some(v) => Some(v),
                    None => {
                        return Err(PipelineError::InvalidNumber {
                            column: LIFE_EXPECTANCY.to_string(),
                            row,
                            value: text,
                        });
                    }
                }
            }
        };
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use polars::prelude::DataType;

    use super::*;
    use lifexp_model::{ErrorKind, YEAR};

    fn raw(columns: Vec<(&str, Vec<Option<&str>>)>) -> RawTable {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        RawTable::new(DataFrame::new(cols).unwrap())
    }

    #[test]
    fn splits_identifier_and_trims_names() {
        let table = raw(vec![
            (COMPOUND_ID_COLUMN, vec![Some("YR,F,Y1,AT"), Some("YR,M,Y_LT1,PT")]),
            ("2021 ", vec![Some("81.3"), Some(":")]),
            (" 2020", vec![Some("80.1 e"), Some("79.0")]),
        ]);

        let split = split_compound_column(table).unwrap();

        assert_eq!(
            split.column_names(),
            vec!["2021", "2020", "unit", "sex", "age", "region"]
        );
        assert_eq!(split.height(), 2);
        let regions = column_strings(split.frame().column(REGION).unwrap()).unwrap();
        assert_eq!(regions, vec![Some("AT".to_string()), Some("PT".to_string())]);
        let ages = column_strings(split.frame().column(AGE).unwrap()).unwrap();
        assert_eq!(ages, vec![Some("Y1".to_string()), Some("Y_LT1".to_string())]);
    }

    #[test]
    fn three_part_identifier_is_schema_error() {
        let table = raw(vec![
            (COMPOUND_ID_COLUMN, vec![Some("YR,F,Y1,AT"), Some("YR,F,PT")]),
            ("2020 ", vec![Some("80.1"), Some("abc")]),
        ]);

        let err = split_compound_column(table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(matches!(
            err,
            PipelineError::CompoundSplit { row: 1, parts: 3, .. }
        ));
    }

    #[test]
    fn missing_identifier_cell_is_schema_error() {
        let table = raw(vec![(COMPOUND_ID_COLUMN, vec![None]), ("2020", vec![Some("1")])]);

        let err = split_compound_column(table).unwrap_err();
        assert!(matches!(err, PipelineError::NullIdentifier { row: 0 }));
    }

    #[test]
    fn headers_colliding_after_trim_are_schema_error() {
        let table = raw(vec![
            (COMPOUND_ID_COLUMN, vec![Some("YR,F,Y1,AT")]),
            ("2019 ", vec![Some("80.1")]),
            ("2019", vec![Some("80.2")]),
        ]);

        let err = split_compound_column(table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(matches!(
            err,
            PipelineError::DuplicateColumn { ref column } if column == "2019"
        ));
    }

    #[test]
    fn header_shadowing_identifier_column_is_schema_error() {
        let table = raw(vec![
            (COMPOUND_ID_COLUMN, vec![Some("YR,F,Y1,AT")]),
            ("region ", vec![Some("80.1")]),
        ]);

        let err = split_compound_column(table).unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateColumn { .. }));
    }

    #[test]
    fn missing_compound_column_is_schema_error() {
        let table = raw(vec![("2020", vec![Some("1")])]);

        let err = split_compound_column(table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn selects_and_renames_discrete_columns() {
        let table = RawTable::new(
            DataFrame::new(vec![
                Series::new("flag".into(), vec!["x"]).into_column(),
                Series::new("unit".into(), vec!["YR"]).into_column(),
                Series::new("sex".into(), vec!["Y"]).into_column(),
                Series::new("age".into(), vec!["Y_LT1"]).into_column(),
                Series::new("country".into(), vec!["BE"]).into_column(),
                Series::new("year".into(), vec![2020i64]).into_column(),
                Series::new("life_expectancy".into(), vec![81i64]).into_column(),
            ])
            .unwrap(),
        );

        let split = select_discrete_columns(table).unwrap();

        assert_eq!(
            split.column_names(),
            vec!["unit", "sex", "age", "region", "year", "value"]
        );
        let frame = split.frame();
        assert_eq!(frame.column(VALUE).unwrap().dtype(), &DataType::Float64);
        assert_eq!(frame.column(YEAR).unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn discrete_missing_column_is_schema_error() {
        let table = raw(vec![
            ("unit", vec![Some("YR")]),
            ("sex", vec![Some("Y")]),
            ("age", vec![Some("Y_LT1")]),
            ("year", vec![Some("2020")]),
            ("life_expectancy", vec![Some("81.0")]),
        ]);

        let err = select_discrete_columns(table).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingColumn { ref column } if column == "country"
        ));
    }

    #[test]
    fn discrete_text_values_are_parsed_or_rejected() {
        let build = |value: Option<&str>| {
            raw(vec![
                ("unit", vec![Some("YR")]),
                ("sex", vec![Some("Y")]),
                ("age", vec![Some("Y_LT1")]),
                ("country", vec![Some("PT")]),
                ("year", vec![Some("2020")]),
                ("life_expectancy", vec![value]),
            ])
        };

        let split = select_discrete_columns(build(Some("80.5"))).unwrap();
        assert_eq!(
            split.frame().column(VALUE).unwrap().get(0).unwrap(),
            AnyValue::Float64(80.5)
        );

        let split = select_discrete_columns(build(None)).unwrap();
        assert_eq!(split.frame().column(VALUE).unwrap().null_count(), 1);

        let err = select_discrete_columns(build(Some("n/a"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn preprocessor_for_matches_format() {
        assert_eq!(preprocessor_for(SourceFormat::Csv).name(), "compound");
        assert_eq!(preprocessor_for(SourceFormat::Zip).name(), "discrete");
    }
}
