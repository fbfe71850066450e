//! Cleaning pipeline with explicit stages.
//!
//! 1. **Load**: read the TSV extract or the ZIP's JSON member
//! 2. **Preprocess**: split the compound identifier or select discrete columns
//! 3. **Normalize**: coerce annotated year cells to numbers (wide sources only)
//! 4. **Reshape**: unpivot year columns into rows (wide sources only)
//! 5. **Filter**: keep one region, drop missing values, cast years
//!
//! Writing is left to the caller so a run can be inspected without touching disk.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use lifexp_ingest::loader_for;
use lifexp_model::{FinalTable, ID_COLUMNS, Region, SourceConfig, SourceFormat};
use lifexp_transform::{
    finalize_discrete, finalize_long, normalize_values, preprocessor_for, unpivot_years,
    year_columns,
};

/// Row counts observed at each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub raw_rows: usize,
    pub split_rows: usize,
    /// Zero for sources that are already long.
    pub year_columns: usize,
    pub long_rows: usize,
    pub final_rows: usize,
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub table: FinalTable,
    pub counts: StageCounts,
    /// Source locator as reported by the loader.
    pub source: String,
}

/// Runs every stage up to the final table for `region`.
///
/// Errors keep the underlying [`lifexp_model::PipelineError`] and carry the
/// failed stage name as context.
pub fn run_pipeline(
    format: SourceFormat,
    config: &SourceConfig,
    region: Region,
) -> Result<PipelineOutcome> {
    let span = info_span!("clean", region = %region, format = %format);
    let _guard = span.enter();

    let config_json = serde_json::to_string(config).context("serialize source config")?;
    debug!(
        config = %config_json,
        path = %config.source_path(format).display(),
        "resolved source"
    );

    let loader = loader_for(format, config);
    let source = loader.source();
    let raw = loader.load().context("load")?;
    let mut counts = StageCounts {
        raw_rows: raw.height(),
        ..StageCounts::default()
    };
    info!(source = %source, rows = counts.raw_rows, "loaded source");

    let preprocessor = preprocessor_for(format);
    let split = preprocessor.preprocess(raw).context("preprocess")?;
    counts.split_rows = split.height();
    debug!(
        preprocessor = preprocessor.name(),
        rows = counts.split_rows,
        columns = split.frame().width(),
        "preprocessed"
    );

    let table = match format {
        SourceFormat::Csv => {
            let years = year_columns(&split);
            counts.year_columns = years.len();
            let normalized = normalize_values(split, &years).context("normalize")?;
            debug!(year_columns = counts.year_columns, "normalized values");

            let long = unpivot_years(normalized, &ID_COLUMNS, &years).context("reshape")?;
            counts.long_rows = long.height();
            info!(rows = counts.long_rows, "reshaped to long format");

            finalize_long(long, region).context("filter")?
        }
        SourceFormat::Zip => {
            counts.long_rows = counts.split_rows;
            finalize_discrete(split, region).context("filter")?
        }
    };
    counts.final_rows = table.height();
    info!(rows = counts.final_rows, "filtered to region");

    Ok(PipelineOutcome {
        table,
        counts,
        source,
    })
}
