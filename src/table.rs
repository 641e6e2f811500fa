use std::io::Read;

use crate::config::DataColumns;
use crate::error::{DiagramError, Result};
use crate::ir::{RawCell, RawEdge};

/// Row/column access to formatted cell values, the shape of a spreadsheet
/// range or a parsed CSV file.
pub trait DataTable {
    fn num_rows(&self) -> usize;
    fn num_columns(&self) -> usize;
    fn cell(&self, row: usize, column: usize) -> RawCell;
}

#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl CsvTable {
    pub fn from_reader<R: Read>(reader: R, has_headers: bool) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut columns = 0;
        for record in csv_reader.records() {
            let record = record.map_err(|err| DiagramError::Table(err.to_string()))?;
            columns = columns.max(record.len());
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows, columns })
    }

    pub fn parse(text: &str, has_headers: bool) -> Result<Self> {
        Self::from_reader(text.as_bytes(), has_headers)
    }
}

impl DataTable for CsvTable {
    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_columns(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, column: usize) -> RawCell {
        match self.rows.get(row).and_then(|cells| cells.get(column)) {
            Some(text) if !text.is_empty() => RawCell::Text(text.clone()),
            _ => RawCell::Empty,
        }
    }
}

/// In-memory table of already typed cells.
impl DataTable for Vec<Vec<RawCell>> {
    fn num_rows(&self) -> usize {
        self.len()
    }

    fn num_columns(&self) -> usize {
        self.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn cell(&self, row: usize, column: usize) -> RawCell {
        self.get(row)
            .and_then(|cells| cells.get(column))
            .cloned()
            .unwrap_or(RawCell::Empty)
    }
}

/// Reads every row through the column mapping. A hint column the table does
/// not have, or an empty hint cell, yields a record without a hint.
pub fn records_from_table<T: DataTable + ?Sized>(table: &T, columns: &DataColumns) -> Vec<RawEdge> {
    let has_hint = columns.position_hint < table.num_columns();
    (0..table.num_rows())
        .map(|row| RawEdge {
            target: table.cell(row, columns.target_id),
            weight: table.cell(row, columns.weight),
            source: table.cell(row, columns.source_id),
            position_hint: has_hint
                .then(|| table.cell(row, columns.position_hint))
                .filter(|cell| *cell != RawCell::Empty),
        })
        .collect()
}
