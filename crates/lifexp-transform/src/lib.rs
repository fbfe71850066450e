//! Cleaning stages for the life expectancy tables.
//!
//! - **preprocess**: split the compound identifier (or select discrete columns)
//! - **normalize**: coerce annotated year cells to nullable numbers
//! - **reshape**: unpivot year columns into `year`/`value` rows
//! - **filter**: drop missing values, keep one region, cast years
//!
//! Every stage consumes its input table and returns the next stage.

pub mod filter;
pub mod normalize;
pub mod preprocess;
pub mod reshape;

pub use filter::{finalize_discrete, finalize_long};
pub use normalize::{MISSING_SENTINEL, normalize_cell, normalize_values, year_columns};
pub use preprocess::{
    CompoundColumnPreprocessor, DISCRETE_SOURCE_COLUMNS, DiscreteColumnPreprocessor, Preprocessor,
    preprocessor_for, select_discrete_columns, split_compound_column,
};
pub use reshape::unpivot_years;
