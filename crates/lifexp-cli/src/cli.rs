//! CLI argument definitions for the life expectancy cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use lifexp_model::{DEFAULT_DATA_DIR, Region, SourceFormat};

#[derive(Parser)]
#[command(
    name = "lifexp",
    version,
    about = "Clean Eurostat life expectancy extracts into a tidy per-region CSV",
    long_about = "Clean Eurostat life expectancy extracts into a tidy per-region CSV.\n\n\
                  Reads either the wide TSV extract or the JSON member of the ZIP \
                  archive and writes <region>_life_expectancy.csv."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean one region's life expectancy series and write it as CSV.
    Clean(CleanArgs),

    /// List the supported region codes.
    Regions(RegionsArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Region code to keep, e.g. PT or EU27_2020 (case-sensitive).
    #[arg(long = "region", value_name = "CODE", default_value = "PT")]
    pub region: Region,

    /// Source format to read.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Directory holding the source files and the default output.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Output file (default: <DATA_DIR>/<region>_life_expectancy.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RegionsArgs {
    /// Hide aggregate regions such as EU27_2020 or EFTA.
    #[arg(long = "countries-only")]
    pub countries_only: bool,
}

/// CLI source format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Wide tab-separated extract.
    Csv,
    /// JSON member of the ZIP archive.
    Zip,
}

impl From<FormatArg> for SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Zip => SourceFormat::Zip,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clean_defaults() {
        let cli = Cli::try_parse_from(["lifexp", "clean"]).unwrap();
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.region, Region::Portugal);
        assert_eq!(SourceFormat::from(args.format), SourceFormat::Csv);
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert!(args.output.is_none());
    }

    #[test]
    fn clean_parses_region_and_format() {
        let cli =
            Cli::try_parse_from(["lifexp", "clean", "--region", "EU27_2020", "--format", "zip"])
                .unwrap();
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.region, Region::EuropeanUnion27From2020);
        assert_eq!(SourceFormat::from(args.format), SourceFormat::Zip);
    }

    #[test]
    fn invalid_region_and_format_are_rejected() {
        assert!(Cli::try_parse_from(["lifexp", "clean", "--region", "pt"]).is_err());
        assert!(Cli::try_parse_from(["lifexp", "clean", "--region", "XX"]).is_err());
        assert!(Cli::try_parse_from(["lifexp", "clean", "--format", "parquet"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lifexp", "regions", "--countries-only", "--log-format", "json"])
            .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Regions(args) = cli.command else {
            panic!("expected regions");
        };
        assert!(args.countries_only);
    }
}
