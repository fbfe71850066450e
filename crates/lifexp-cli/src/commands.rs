use anyhow::{Context, Result};
use tracing::info;

use lifexp_cli::pipeline::{StageCounts, run_pipeline};
use lifexp_model::{Region, SourceConfig, SourceFormat};
use lifexp_output::{WrittenFile, write_final_table};

use crate::cli::{CleanArgs, RegionsArgs};
use crate::summary::region_table;

/// Everything the summary needs about a finished `clean` run.
#[derive(Debug)]
pub struct CleanResult {
    pub region: Region,
    pub format: SourceFormat,
    pub source: String,
    pub counts: StageCounts,
    pub written: WrittenFile,
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let format = SourceFormat::from(args.format);
    let config = SourceConfig::new().with_data_dir(&args.data_dir);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_path(args.region));

    let outcome = run_pipeline(format, &config, args.region)?;
    let written = write_final_table(&outcome.table, &output).context("write")?;
    info!(path = %written.path.display(), rows = written.rows, "clean finished");

    Ok(CleanResult {
        region: args.region,
        format,
        source: outcome.source,
        counts: outcome.counts,
        written,
    })
}

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let regions = if args.countries_only {
        Region::countries()
    } else {
        Region::ALL.to_vec()
    };
    println!("{}", region_table(&regions));
    Ok(())
}
