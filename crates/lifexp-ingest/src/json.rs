//! Row-oriented JSON (array of objects) to DataFrame conversion.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde_json::{Map, Value};

/// Parses `text` as a JSON array of objects.
///
/// Returns a human-readable message on failure; callers attach the source path.
pub fn parse_records(text: &str) -> Result<Vec<Map<String, Value>>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let Value::Array(items) = value else {
        return Err("expected a JSON array of objects".to_string());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(format!(
                "record {idx} is not an object: {}",
                json_type_name(&other)
            )),
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Integer,
    Float,
    Boolean,
    Text,
}

fn infer_kind(cells: &[Option<&Value>]) -> CellKind {
    let mut kind: Option<CellKind> = None;
    for value in cells.iter().flatten() {
        let cell = match value {
            Value::Number(n) if n.is_i64() => CellKind::Integer,
            Value::Number(_) => CellKind::Float,
            Value::Bool(_) => CellKind::Boolean,
            _ => return CellKind::Text,
        };
        kind = Some(match (kind, cell) {
            (None, cell) => cell,
            (Some(prev), cell) if prev == cell => prev,
            (Some(CellKind::Integer), CellKind::Float) | (Some(CellKind::Float), CellKind::Integer) => {
                CellKind::Float
            }
            _ => return CellKind::Text,
        });
    }
    kind.unwrap_or(CellKind::Text)
}

fn text_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds a frame whose columns are the union of the records' keys, in the
/// order they are first seen.
///
/// Missing keys and JSON `null` become null cells. Columns holding only
/// integers become `Int64`, only numbers `Float64`, only booleans `Boolean`,
/// anything else `String`.
pub fn records_to_frame(records: &[Map<String, Value>]) -> PolarsResult<DataFrame> {
    let mut keys: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(keys.len());
    for key in keys {
        let cells: Vec<Option<&Value>> = records
            .iter()
            .map(|record| record.get(key).filter(|value| !value.is_null()))
            .collect();
        let series = match infer_kind(&cells) {
            CellKind::Integer => Series::new(
                key.into(),
                cells
                    .iter()
                    .map(|cell| cell.and_then(Value::as_i64))
                    .collect::<Vec<_>>(),
            ),
            CellKind::Float => Series::new(
                key.into(),
                cells
                    .iter()
                    .map(|cell| cell.and_then(Value::as_f64))
                    .collect::<Vec<_>>(),
            ),
            CellKind::Boolean => Series::new(
                key.into(),
                cells
                    .iter()
                    .map(|cell| cell.and_then(Value::as_bool))
                    .collect::<Vec<_>>(),
            ),
            CellKind::Text => Series::new(
                key.into(),
                cells
                    .iter()
                    .map(|cell| cell.map(text_cell))
                    .collect::<Vec<Option<String>>>(),
            ),
        };
        columns.push(series.into_column());
    }
    DataFrame::new(columns)
}
