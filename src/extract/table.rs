//! Assembling the certificate table into a text grid.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Block, BlockType};
use crate::normalize::nfc;

use super::index::BlockIndex;

/// Cell texts of one table, keyed by 1-based `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    cells: HashMap<(u32, u32), String>,
}

impl CellGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TABLE block: every CELL child becomes the space-joined text of
    /// its WORD children. A later cell at the same position replaces an
    /// earlier one.
    pub fn from_table(index: &BlockIndex, table: &Block) -> Result<Self> {
        let mut grid = Self::new();
        for child in index.children(table) {
            let cell = child?;
            if !cell.is(BlockType::Cell) {
                continue;
            }
            let (row, column) = cell.require_position()?;
            let text = cell_text(index, cell)?;
            grid.insert(row, column, text);
        }
        log::debug!("CellGrid: {} cells from table {}", grid.len(), table.id);
        Ok(grid)
    }

    /// Set the text at a position.
    pub fn insert(&mut self, row: u32, column: u32, text: impl Into<String>) {
        self.cells.insert((row, column), text.into());
    }

    /// Text at a position, empty when the cell is absent.
    pub fn get(&self, row: u32, column: u32) -> &str {
        self.cells
            .get(&(row, column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest row index present.
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0)
    }

    /// Highest column index present.
    pub fn column_count(&self) -> u32 {
        self.cells.keys().map(|(_, c)| *c).max().unwrap_or(0)
    }
}

/// Grid of the first TABLE block, or `None` when the document has no table.
pub fn extract_grid(index: &BlockIndex) -> Result<Option<CellGrid>> {
    match index.first_of_type(BlockType::Table) {
        Some(table) => CellGrid::from_table(index, table).map(Some),
        None => Ok(None),
    }
}

fn cell_text(index: &BlockIndex, cell: &Block) -> Result<String> {
    let mut words = Vec::new();
    for child in index.children(cell) {
        let block = child?;
        if block.is(BlockType::Word) {
            words.push(nfc(block.require_text()?));
        }
    }
    Ok(words.join(" ").trim().to_string())
}
