use crate::error::CoreError;
use std::collections::HashSet;

/// Operator records as read from the wire: a header plus text cells, every
/// row as wide as the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, CoreError> {
        let expected = columns.len();
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(CoreError::RaggedRow {
                row: index + 1,
                expected,
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_positions(&self, name: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.as_str() == name)
            .map(|(index, _)| index)
            .collect()
    }

    /// Collapses rows that are identical across every column, keeping the
    /// first occurrence and the original order.
    pub fn deduplicated(&self) -> RawTable {
        let mut seen: HashSet<&[String]> = HashSet::with_capacity(self.rows.len());
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row.as_slice()))
            .cloned()
            .collect();
        RawTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawTable;
    use crate::error::CoreError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = RawTable::new(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::RaggedRow {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn deduplicated_keeps_first_occurrence_in_order() {
        let table = RawTable::new(
            strings(&["a", "b"]),
            vec![
                strings(&["1", "2"]),
                strings(&["3", "4"]),
                strings(&["1", "2"]),
                strings(&["1", "5"]),
            ],
        )
        .unwrap();
        let deduped = table.deduplicated();
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped.row(0).unwrap(), strings(&["1", "2"]).as_slice());
        assert_eq!(deduped.row(2).unwrap(), strings(&["1", "5"]).as_slice());
        assert_eq!(deduped.columns(), table.columns());
    }

    #[test]
    fn column_positions_reports_duplicates() {
        let table = RawTable::new(strings(&["x", "duration", "duration"]), Vec::new()).unwrap();
        assert_eq!(table.column_positions("duration"), vec![1, 2]);
        assert!(table.column_positions("missing").is_empty());
    }
}
