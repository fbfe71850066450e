//! Shared utilities for the life expectancy crates.
//!
//! Polars `AnyValue` conversions and column extraction helpers used by the
//! ingest, transform and output stages.

pub mod polars;

pub use self::polars::{
    any_to_f64, any_to_optional_string, any_to_string, any_to_whole_i64, column_strings,
    format_numeric, parse_f64,
};
