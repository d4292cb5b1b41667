//! Row-oriented tables built from flattened records.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::flatten::SCALAR_COLUMN;
use crate::types::Record;

/// A table of flat JSON rows.
///
/// `columns` is the union of every row's keys, in the order they are first
/// seen. Rows keep their own key order and are not padded: a column a row
/// lacks reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table by serializing each record to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Encode`] if a record fails to serialize.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self, ScraperError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::to_value(record)
                    .map(|value| match value {
                        Value::Object(fields) => fields,
                        scalar => {
                            let mut row = Map::new();
                            row.insert(SCALAR_COLUMN.to_owned(), scalar);
                            row
                        }
                    })
                    .map_err(|source| ScraperError::Encode {
                        context: format!("table row {index}"),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows))
    }

    #[must_use]
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let columns = {
            let mut seen = HashSet::new();
            let mut columns = Vec::new();
            for key in rows.iter().flat_map(Map::keys) {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
            columns
        };
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, one entry per row.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }

    /// Writes one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns any I/O or encoding error from the writer.
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for row in &self.rows {
            serde_json::to_writer(&mut writer, row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}
