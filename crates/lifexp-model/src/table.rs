//! Table stages of the cleaning pipeline.
//!
//! Each stage wraps a Polars [`DataFrame`]. Stage functions take their input
//! by value and return the next stage, so a caller never holds a table that a
//! later stage has already consumed.
//!
//! | Stage               | Produced by        | Shape                                   |
//! |---------------------|--------------------|-----------------------------------------|
//! | [`RawTable`]        | loader             | columns as found in the source          |
//! | [`SplitTable`]      | preprocessor       | discrete `unit, sex, age, region`       |
//! | [`NormalizedTable`] | value normalizer   | year cells as nullable `f64`            |
//! | [`LongTable`]       | reshaper           | `unit, sex, age, region, year, value`   |
//! | [`FinalTable`]      | filter/finalizer   | one region, integer year, no nulls      |

use polars::prelude::DataFrame;

/// Compound identifier header of the wide Eurostat extract.
pub const COMPOUND_ID_COLUMN: &str = "unit,sex,age,geo\\time";

pub const UNIT: &str = "unit";
pub const SEX: &str = "sex";
pub const AGE: &str = "age";
pub const REGION: &str = "region";
pub const YEAR: &str = "year";
pub const VALUE: &str = "value";

/// Discrete identifier columns, in output order.
pub const ID_COLUMNS: [&str; 4] = [UNIT, SEX, AGE, REGION];

/// Column order of a [`FinalTable`] and of the written CSV.
pub const OUTPUT_COLUMNS: [&str; 6] = [UNIT, SEX, AGE, REGION, YEAR, VALUE];

macro_rules! table_stage {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            data: DataFrame,
        }

        impl $name {
            /// Wraps a frame that already has this stage's shape.
            pub fn new(data: DataFrame) -> Self {
                Self { data }
            }

            pub fn frame(&self) -> &DataFrame {
                &self.data
            }

            /// Releases the underlying frame.
            pub fn into_frame(self) -> DataFrame {
                self.data
            }

            /// Number of rows.
            pub fn height(&self) -> usize {
                self.data.height()
            }

            /// Column names in frame order.
            pub fn column_names(&self) -> Vec<String> {
                self.data
                    .get_column_names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect()
            }

            pub fn has_column(&self, name: &str) -> bool {
                self.data.column(name).is_ok()
            }
        }
    };
}

table_stage!(
    /// Rows and columns exactly as loaded from a source.
    RawTable
);

table_stage!(
    /// Raw table with discrete `unit`, `sex`, `age` and `region` columns and
    /// trimmed column names.
    SplitTable
);

table_stage!(
    /// Split table whose year columns hold nullable `f64` values.
    NormalizedTable
);

table_stage!(
    /// One row per identifier combination and year, before null-dropping.
    LongTable
);

table_stage!(
    /// Region-filtered rows with integer `year` and non-null `value`.
    FinalTable
);

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn stage_exposes_columns_and_height() {
        let columns: Vec<Column> = vec![
            Series::new(UNIT.into(), vec!["YR", "YR"]).into_column(),
            Series::new(REGION.into(), vec!["PT", "BE"]).into_column(),
        ];
        let table = SplitTable::new(DataFrame::new(columns).unwrap());

        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names(), vec!["unit", "region"]);
        assert!(table.has_column(REGION));
        assert!(!table.has_column(YEAR));
    }
}
