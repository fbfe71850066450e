//! Integration tests for the TSV and ZIP loaders.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::DataType;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use lifexp_ingest::{DataLoader, TsvLoader, ZipJsonLoader, read_tsv_table};
use lifexp_model::{COMPOUND_ID_COLUMN, ErrorKind};

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_zip(dir: &Path, name: &str, member: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    writer.start_file(member, SimpleFileOptions::default()).unwrap();
    writer.write_all(content.as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}

#[test]
fn tsv_keeps_headers_verbatim_and_reads_text() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "raw.tsv",
        "unit,sex,age,geo\\time\t2021 \t2020 \nYR,F,Y1,AT\t81.3 e\t:\nYR,M,Y1,PT\t78.1\t77.9 \n",
    );

    let table = read_tsv_table(&path).unwrap();

    assert_eq!(
        table.column_names(),
        vec![COMPOUND_ID_COLUMN, "2021 ", "2020 "]
    );
    assert_eq!(table.height(), 2);
    for name in table.column_names() {
        assert_eq!(table.frame().column(&name).unwrap().dtype(), &DataType::String);
    }
}

#[test]
fn tsv_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let loader = TsvLoader::new(dir.path().join("missing.tsv"));

    let err = loader.load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn tsv_ragged_rows_are_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "ragged.tsv",
        "unit,sex,age,geo\\time\t2020 \nYR,F,Y1,AT\t81.3\t80.1\t79.0\n",
    );

    let err = read_tsv_table(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn zip_member_loads_as_typed_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(
        dir.path(),
        "life.zip",
        "life.json",
        r#"[{"unit":"YR","sex":"Y","age":"Y_LT1","country":"BE","year":2020,"life_expectancy":81.0}]"#,
    );

    let table = ZipJsonLoader::new(&path, "life.json").load().unwrap();

    assert_eq!(
        table.column_names(),
        vec!["unit", "sex", "age", "country", "year", "life_expectancy"]
    );
    assert_eq!(table.height(), 1);
    let frame = table.frame();
    assert_eq!(frame.column("year").unwrap().dtype(), &DataType::Int64);
    assert_eq!(
        frame.column("life_expectancy").unwrap().dtype(),
        &DataType::Float64
    );
}

#[test]
fn zip_missing_member_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(dir.path(), "life.zip", "other.json", "[]");

    let err = ZipJsonLoader::new(&path, "life.json").load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn zip_missing_archive_is_not_found() {
    let dir = TempDir::new().unwrap();

    let err = ZipJsonLoader::new(dir.path().join("absent.zip"), "life.json")
        .load()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn zip_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(dir.path(), "life.zip", "life.json", r#"{"unit": "YR"}"#);

    let err = ZipJsonLoader::new(&path, "life.json").load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn non_zip_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "life.zip", "plain text");

    let err = ZipJsonLoader::new(&path, "life.json").load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}
