//! Column-oriented data frames built from API records.
//!
//! Records are serialized through serde and flattened: nested objects become
//! dotted column names (`published_deploy.state`), arrays stay as JSON values.
//! Columns appear in first-seen order across all rows; a row without a
//! column gets `null` there. An object that is null in some rows and has
//! dotted children in others only yields the children.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// One named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A message attached to a frame for the host to show next to the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameMeta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// Tabular result of one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub fields: Vec<Field>,
    pub meta: FrameMeta,
}

impl Frame {
    /// Build a frame from a slice of uniformly shaped records.
    pub fn from_records<T: Serialize>(name: &str, records: &[T]) -> Result<Self, CoreError> {
        let rows = records
            .iter()
            .map(|record| flatten_record(name, record))
            .collect::<Result<Vec<_>, _>>()?;

        let columns: IndexSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
        let fields = columns
            .iter()
            .map(|column| Field {
                name: (*column).clone(),
                values: rows
                    .iter()
                    .map(|row| row.get(*column).cloned().unwrap_or(Value::Null))
                    .collect(),
            })
            .filter(|field| !is_placeholder_parent(field, &columns))
            .collect();

        Ok(Self {
            name: name.to_owned(),
            fields,
            meta: FrameMeta::default(),
        })
    }

    /// Build a one-row frame from a single record.
    pub fn from_record<T: Serialize>(name: &str, record: &T) -> Result<Self, CoreError> {
        Self::from_records(name, std::slice::from_ref(record))
    }

    pub fn row_count(&self) -> usize {
        self.fields.first().map_or(0, |f| f.values.len())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn with_notice(mut self, severity: Severity, text: impl Into<String>) -> Self {
        self.meta.notices.push(Notice {
            severity,
            text: text.into(),
        });
        self
    }

    /// Row-major view for table renderers. Strings are unquoted, nulls empty.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count())
            .map(|idx| {
                self.fields
                    .iter()
                    .map(|f| f.values.get(idx).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An object column that was null or empty in every row where another row
/// flattened it into dotted children.
fn is_placeholder_parent(field: &Field, columns: &IndexSet<&String>) -> bool {
    let prefix = format!("{}.", field.name);
    columns.iter().any(|c| c.starts_with(&prefix))
        && field.values.iter().all(|v| match v {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        })
}

fn flatten_record<T: Serialize>(
    frame: &str,
    record: &T,
) -> Result<IndexMap<String, Value>, CoreError> {
    let value = serde_json::to_value(record).map_err(|e| CoreError::Frame {
        name: frame.to_owned(),
        message: e.to_string(),
    })?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(CoreError::Frame {
                name: frame.to_owned(),
                message: format!("expected a JSON object per record, got {other}"),
            });
        }
    };

    let mut row = IndexMap::new();
    for (key, value) in map {
        flatten_value(key, value, &mut row);
    }
    Ok(row)
}

fn flatten_value(path: String, value: Value, row: &mut IndexMap<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, nested) in map {
                flatten_value(format!("{path}.{key}"), nested, row);
            }
        }
        other => {
            row.insert(path, other);
        }
    }
}
