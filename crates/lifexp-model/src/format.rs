//! Source format selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Which raw source the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Wide tab-separated table with a compound identifier column.
    #[default]
    Csv,
    /// ZIP archive holding a long-format JSON member.
    Zip,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(SourceFormat::Csv),
            "zip" => Ok(SourceFormat::Zip),
            other => Err(PipelineError::UnknownFormat {
                value: other.to_string(),
            }),
        }
    }
}
