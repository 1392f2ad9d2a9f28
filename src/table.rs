//! Minimal in-memory table and the operations that consume an
//! [`Association`].
//!
//! Cells are `Option<String>`; `None` is a missing value. Loading tables
//! from files is left to the caller.

use crate::error::{EntityMatchError, Result, TableErrorKind};
use crate::matching::Association;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single table cell.
pub type Cell = Option<String>;

/// Rows of optional string cells under named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table and fill it with `rows`.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Cell>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(EntityMatchError::table(
                "appending row",
                TableErrorKind::RowWidth {
                    expected: self.columns.len(),
                    actual: row.len(),
                },
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of `name`, or `ColumnNotFound`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EntityMatchError::column_not_found(name))
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }
}

/// Replace every value in `column` that is a key of `association` with its
/// mapped value, in place.
///
/// Values that are not keys are left untouched; keys mapped to no match
/// become missing cells. Returns the number of cells whose value changed.
pub fn replace_entities(table: &mut Table, column: &str, association: &Association) -> Result<usize> {
    let idx = table.column_index(column)?;
    let mut replaced = 0;

    for row in &mut table.rows {
        let cell = &mut row[idx];
        if let Some(mapped) = association.get(cell.as_deref()) {
            if cell.as_deref() != mapped {
                *cell = mapped.map(str::to_string);
                replaced += 1;
            }
        }
    }

    tracing::debug!(column, replaced, rows = table.rows.len(), "Replaced entity names");
    Ok(replaced)
}

/// Collapse rows sharing the same values in `key_columns` to the first row
/// of each group.
///
/// The result has the key columns first, followed by the remaining columns
/// in their original order. Groups are sorted ascending by key; rows with a
/// missing value in any key column are dropped.
pub fn remove_dupes(table: &Table, key_columns: &[&str]) -> Result<Table> {
    let key_idx = key_columns
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>>>()?;
    let rest_idx: Vec<usize> = (0..table.columns.len())
        .filter(|i| !key_idx.contains(i))
        .collect();

    let mut groups: BTreeMap<Vec<&str>, &Vec<Cell>> = BTreeMap::new();
    for row in &table.rows {
        let key: Option<Vec<&str>> = key_idx.iter().map(|&i| row[i].as_deref()).collect();
        if let Some(key) = key {
            groups.entry(key).or_insert(row);
        }
    }

    let order: Vec<usize> = key_idx.iter().chain(rest_idx.iter()).copied().collect();
    let mut deduped = Table::new(order.iter().map(|&i| table.columns[i].clone()));
    deduped.rows = groups
        .into_values()
        .map(|row| order.iter().map(|&i| row[i].clone()).collect())
        .collect();

    tracing::debug!(
        before = table.rows.len(),
        after = deduped.rows.len(),
        "Removed duplicate rows"
    );
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Some(s.to_string())
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(vec![cell("x")]).unwrap_err();
        assert_eq!(
            err.table_kind(),
            Some(&TableErrorKind::RowWidth {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_column_values() {
        let table = Table::from_rows(["name"], vec![vec![cell("a")], vec![None]]).unwrap();
        assert_eq!(table.column_values("name").unwrap(), vec![Some("a"), None]);
        assert!(table.column_values("missing").is_err());
    }

    #[test]
    fn test_remove_dupes_keeps_first_and_reorders() {
        let table = Table::from_rows(
            ["x", "round", "player"],
            vec![
                vec![cell("1"), cell("2"), cell("bob")],
                vec![cell("2"), cell("1"), cell("amy")],
                vec![cell("3"), cell("2"), cell("bob")],
                vec![cell("4"), None, cell("amy")],
            ],
        )
        .unwrap();

        let deduped = remove_dupes(&table, &["round", "player"]).unwrap();
        assert_eq!(deduped.columns(), ["round", "player", "x"]);
        assert_eq!(
            deduped.rows(),
            [
                vec![cell("1"), cell("amy"), cell("2")],
                vec![cell("2"), cell("bob"), cell("1")],
            ]
        );
    }
}
