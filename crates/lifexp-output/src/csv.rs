//! CSV output for final tables.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, SerWriter};
use tracing::info;

use lifexp_model::{FinalTable, PipelineError, Result};

use crate::hash::sha256_hex;

/// A cleaned table that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub rows: usize,
    /// SHA-256 of the written bytes, lowercase hex.
    pub sha256: String,
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Renders a final table as comma-separated UTF-8 with a header row and no
/// index column.
pub fn render_csv(table: &FinalTable) -> Result<Vec<u8>> {
    let mut frame = table.frame().clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut frame)?;
    Ok(buffer)
}

/// Writes a final table to `path`, replacing any existing file.
///
/// The CSV is rendered in memory, written and synced to a sibling
/// `.csv.tmp` file, then renamed onto `path`. An existing output stays
/// untouched unless the rename succeeds.
pub fn write_final_table(table: &FinalTable, path: &Path) -> Result<WrittenFile> {
    let bytes = render_csv(table)?;
    ensure_parent_dir(path)?;

    let temp_path = path.with_extension("csv.tmp");
    if let Err(error) = write_synced(&temp_path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(PipelineError::Io {
            operation: "rename",
            path: path.to_path_buf(),
            source,
        });
    }

    let written = WrittenFile {
        path: path.to_path_buf(),
        rows: table.height(),
        sha256: sha256_hex(&bytes),
    };
    info!(
        path = %written.path.display(),
        rows = written.rows,
        sha256 = %written.sha256,
        "wrote cleaned table"
    );
    Ok(written)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |operation: &'static str| {
        move |source: std::io::Error| PipelineError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    };

    let mut file = File::create(path).map_err(io_error("create"))?;
    file.write_all(bytes).map_err(io_error("write"))?;
    file.sync_all().map_err(io_error("sync"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    use super::*;

    fn empty_final() -> FinalTable {
        FinalTable::new(
            DataFrame::new(vec![
                Series::new("unit".into(), Vec::<String>::new()).into_column(),
                Series::new("sex".into(), Vec::<String>::new()).into_column(),
                Series::new("age".into(), Vec::<String>::new()).into_column(),
                Series::new("region".into(), Vec::<String>::new()).into_column(),
                Series::new("year".into(), Vec::<i64>::new()).into_column(),
                Series::new("value".into(), Vec::<f64>::new()).into_column(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn empty_table_renders_header_only() {
        let bytes = render_csv(&empty_final()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "unit,sex,age,region,year,value\n"
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("pt_life_expectancy.csv");

        let written = write_final_table(&empty_final(), &path).unwrap();

        assert!(path.exists());
        assert_eq!(written.rows, 0);
        assert_eq!(written.sha256.len(), 64);
    }

    #[test]
    fn parent_that_is_a_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = write_final_table(&empty_final(), &blocker.join("out.csv")).unwrap_err();
        assert_eq!(err.kind(), lifexp_model::ErrorKind::Io);
    }

    #[test]
    fn failed_rename_leaves_existing_target_intact() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("pt_life_expectancy.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), b"previous").unwrap();

        let err = write_final_table(&empty_final(), &target).unwrap_err();

        assert_eq!(err.kind(), lifexp_model::ErrorKind::Io);
        assert!(err.to_string().starts_with("failed to rename"));
        assert_eq!(fs::read(target.join("keep.txt")).unwrap(), b"previous");
        assert!(!dir.path().join("pt_life_expectancy.csv.tmp").exists());
    }

    #[test]
    fn replaces_existing_output_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("pt_life_expectancy.csv");
        fs::write(&target, b"stale contents that are longer than a header line\n").unwrap();

        write_final_table(&empty_final(), &target).unwrap();

        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "unit,sex,age,region,year,value\n"
        );
        assert!(!dir.path().join("pt_life_expectancy.csv.tmp").exists());
    }
}
