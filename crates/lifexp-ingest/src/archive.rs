//! JSON members inside ZIP archives.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use lifexp_model::{PipelineError, RawTable, Result};

use crate::json::{parse_records, records_to_frame};

/// Opens `archive_path`, reads `member` and parses it as a JSON array of objects.
///
/// The archive handle lives only for the duration of this call.
pub fn read_zip_json_member(archive_path: &Path, member: &str) -> Result<RawTable> {
    let parse_error = |message: String| PipelineError::Parse {
        path: archive_path.to_path_buf(),
        message,
    };

    let file = File::open(archive_path).map_err(|e| PipelineError::from_io("open", archive_path, e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| parse_error(format!("invalid zip archive: {e}")))?;

    let text = {
        let mut entry = match archive.by_name(member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(PipelineError::MemberNotFound {
                    archive: archive_path.to_path_buf(),
                    member: member.to_string(),
                });
            }
            Err(e) => return Err(parse_error(format!("member '{member}': {e}"))),
        };
        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|e| parse_error(format!("member '{member}': {e}")))?;
        text
    };

    let records = parse_records(&text).map_err(|e| parse_error(format!("member '{member}': {e}")))?;
    let df = records_to_frame(&records)?;

    debug!(
        archive = %archive_path.display(),
        member,
        rows = df.height(),
        columns = df.width(),
        "read zip json member"
    );
    Ok(RawTable::new(df))
}
