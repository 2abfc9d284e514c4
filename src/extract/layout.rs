//! Template layouts: which table cell holds which field.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Field;

/// Fields that are never read from a table cell.
const DERIVED_FIELDS: [Field; 4] = [
    Field::StatoCivile,
    Field::ElectronicSeal,
    Field::Comune,
    Field::Sezione,
];

/// Position of one field in the certificate table (1-based, as reported by
/// the analysis service).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBinding {
    /// Target field
    pub field: Field,
    /// Table row
    pub row: u32,
    /// Table column
    pub column: u32,
}

impl CellBinding {
    /// Create a binding.
    pub fn new(field: Field, row: u32, column: u32) -> Self {
        Self { field, row, column }
    }
}

/// A named mapping from table cells to record fields.
///
/// Supporting another certificate template means loading another layout,
/// e.g. from JSON:
///
/// ```
/// use albcert::extract::TemplateLayout;
///
/// let layout = TemplateLayout::from_json(r#"{
///     "name": "short form",
///     "cells": [
///         {"field": "Nome", "row": 1, "column": 2},
///         {"field": "Cognome", "row": 2, "column": 2}
///     ]
/// }"#).unwrap();
/// assert_eq!(layout.cells.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLayout {
    /// Human-readable template name
    pub name: String,

    /// Cell positions
    pub cells: Vec<CellBinding>,
}

impl TemplateLayout {
    /// Layout of the civil-registry birth certificate ("Certifikatë
    /// Lindje"): values in column 2, rows 2-14, row 11 being the civil
    /// status checkboxes.
    pub fn birth_certificate() -> Self {
        let rows = [
            (Field::Nome, 2),
            (Field::Cognome, 3),
            (Field::NumeroPersonale, 4),
            (Field::NomeDelPadre, 5),
            (Field::NomeDellaMadre, 6),
            (Field::DataDiNascita, 7),
            (Field::LuogoDiNascita, 8),
            (Field::Residenza, 9),
            (Field::Sesso, 10),
            (Field::Cittadinanza, 12),
            (Field::CognomePrimaDelMatrimonio, 13),
            (Field::DataDelRilascio, 14),
        ];
        Self {
            name: "Certifikatë Lindje".to_string(),
            cells: rows
                .into_iter()
                .map(|(field, row)| CellBinding::new(field, row, 2))
                .collect(),
        }
    }

    /// Parse and validate a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load and validate a layout from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every field is bound at most once, to a real cell, and is
    /// a field that can come from the table.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for binding in &self.cells {
            if DERIVED_FIELDS.contains(&binding.field) {
                return Err(Error::InvalidLayout(format!(
                    "{} is not read from the table",
                    binding.field
                )));
            }
            if binding.row == 0 || binding.column == 0 {
                return Err(Error::InvalidLayout(format!(
                    "{} bound to row {}, column {} (indices start at 1)",
                    binding.field, binding.row, binding.column
                )));
            }
            if !seen.insert(binding.field) {
                return Err(Error::InvalidLayout(format!(
                    "{} bound more than once",
                    binding.field
                )));
            }
        }
        Ok(())
    }

    /// Cell holding `field`, if the layout binds it.
    pub fn cell_for(&self, field: Field) -> Option<(u32, u32)> {
        self.cells
            .iter()
            .find(|b| b.field == field)
            .map(|b| (b.row, b.column))
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self::birth_certificate()
    }
}
