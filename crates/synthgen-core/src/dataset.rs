use serde::{Deserialize, Serialize};

use crate::value::{Row, Value};

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_null()).count()
    }

    /// Non-missing numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }
}

/// Column-oriented table of generated rows.
///
/// All columns share the same length; column order follows the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Create an empty dataset with the given column names.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|name| Column::new(name, Vec::new()))
                .collect(),
            rows: 0,
        }
    }

    /// Build a dataset from equal-length columns.
    ///
    /// Shorter columns are padded with nulls up to the longest one.
    pub fn from_columns(mut columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(Column::len).max().unwrap_or(0);
        for column in &mut columns {
            column.values.resize(rows, Value::Null);
        }
        Self { columns, rows }
    }

    /// Build a dataset from rows, taking columns in first-seen order.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for row in rows {
            for name in row.field_names() {
                if !names.iter().any(|existing| existing == name) {
                    names.push(name.to_string());
                }
            }
        }
        let mut dataset = Self::with_columns(names);
        for row in rows {
            dataset.push_row(row);
        }
        dataset
    }

    /// Append a row; fields missing from the row become nulls and unknown
    /// fields are ignored.
    pub fn push_row(&mut self, row: &Row) {
        for column in &mut self.columns {
            let value = row.get(&column.name).cloned().unwrap_or(Value::Null);
            column.values.push(value);
        }
        self.rows += 1;
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|column| column.values.get(row))
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.rows {
            return None;
        }
        let mut row = Row::new();
        for column in &self.columns {
            let value = column.values.get(index).cloned().unwrap_or(Value::Null);
            row.insert(column.name.clone(), value);
        }
        Some(row)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.rows).filter_map(move |index| self.row(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_through_columns() {
        let rows = vec![
            Row::new().with("id", 1_i64).with("name", "Ana"),
            Row::new().with("id", 2_i64),
        ];
        let dataset = Dataset::from_rows(&rows);

        assert_eq!(dataset.num_rows(), 2);
        assert_eq!(dataset.column_names(), vec!["id", "name"]);
        assert_eq!(dataset.value(1, "name"), Some(&Value::Null));
        assert_eq!(dataset.row(0), Some(rows[0].clone()));
        assert_eq!(dataset.row(2), None);
    }

    #[test]
    fn from_columns_pads_short_columns() {
        let dataset = Dataset::from_columns(vec![
            Column::new("a", vec![Value::Int(1), Value::Int(2)]),
            Column::new("b", vec![Value::Int(3)]),
        ]);
        assert_eq!(dataset.num_rows(), 2);
        assert_eq!(dataset.value(1, "b"), Some(&Value::Null));
    }

    #[test]
    fn ragged_deserialized_columns_read_as_null() {
        let raw = serde_json::json!({
            "columns": [
                {"name": "a", "values": [1, 2]},
                {"name": "b", "values": [3]}
            ],
            "rows": 2
        });
        let dataset: Dataset = serde_json::from_value(raw).expect("dataset");
        let row = dataset.row(1).expect("second row");
        assert_eq!(row.get("a"), Some(&Value::Int(2)));
        assert_eq!(row.get("b"), Some(&Value::Null));
        assert_eq!(dataset.rows().count(), 2);
    }
}
