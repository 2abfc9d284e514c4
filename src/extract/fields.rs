//! Assembling the record from the table, the checkbox, the seal and the
//! header.

use serde::Serialize;

use crate::error::Result;
use crate::model::{CivilStatus, Field, Record};
use crate::normalize::{normalize_citizenship, normalize_sex};

use super::checkbox::resolve_civil_status;
use super::header::{extract_header_with, Header};
use super::index::BlockIndex;
use super::options::ExtractOptions;
use super::seal::{find_seal, ElectronicSeal};
use super::table::{extract_grid, CellGrid};

/// Everything read from one document.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// All sixteen fields, blank where nothing was found
    pub record: Record,

    /// Civil-status outcome; `None` when the document has no table
    pub civil_status: Option<CivilStatus>,

    /// Footer seal, when complete
    pub seal: Option<ElectronicSeal>,

    /// Issuing office
    pub header: Header,
}

impl Extraction {
    /// Whether the certificate table was found.
    pub fn has_table(&self) -> bool {
        self.civil_status.is_some()
    }

    /// Whether anything expected was missing from the document.
    pub fn is_degraded(&self) -> bool {
        !matches!(self.civil_status, Some(status) if status.is_resolved()) || self.seal.is_none()
    }
}

/// Read the table-derived fields: the layout cells, civil status and seal.
///
/// A document without a TABLE block gives an empty record.
pub fn extract_table_fields(index: &BlockIndex, options: &ExtractOptions) -> Result<Record> {
    let lines = index.line_texts()?;
    Ok(read_table(index, &lines, options)?
        .map(|table| table.record)
        .unwrap_or_default())
}

/// Read a complete record: table fields plus the issuing office.
pub fn extract(index: &BlockIndex, options: &ExtractOptions) -> Result<Extraction> {
    let lines = index.line_texts()?;
    let table = read_table(index, &lines, options)?;
    let header = extract_header_with(&lines, &options.place_rules);

    let (mut record, civil_status, seal) = match table {
        Some(table) => (table.record, Some(table.civil_status), table.seal),
        None => (Record::new(), None, None),
    };
    record.set(Field::Comune, header.comune.clone());
    record.set(Field::Sezione, header.sezione.clone());
    record.complete();

    Ok(Extraction {
        record,
        civil_status,
        seal,
        header,
    })
}

struct TableFields {
    record: Record,
    civil_status: CivilStatus,
    seal: Option<ElectronicSeal>,
}

fn read_table(
    index: &BlockIndex,
    lines: &[String],
    options: &ExtractOptions,
) -> Result<Option<TableFields>> {
    let Some(grid) = extract_grid(index)? else {
        log::warn!("No table found, record left empty");
        return Ok(None);
    };

    let mut record = read_cells(&grid, options);

    let civil_status = resolve_civil_status(index, record.get(Field::Sesso))?;
    record.set(Field::StatoCivile, civil_status.to_field_value());

    let seal = find_seal(lines);
    match &seal {
        Some(seal) => record.set(Field::ElectronicSeal, seal.to_field_value()),
        None => {
            log::warn!("No complete electronic seal found");
            record.set(Field::ElectronicSeal, "");
        }
    }

    Ok(Some(TableFields {
        record,
        civil_status,
        seal,
    }))
}

fn read_cells(grid: &CellGrid, options: &ExtractOptions) -> Record {
    let mut record = Record::new();
    for binding in &options.layout.cells {
        let raw = grid.get(binding.row, binding.column);
        let value = match binding.field {
            Field::Sesso => normalize_sex(raw),
            Field::Residenza if !raw.is_empty() => options
                .place_rules
                .apply(&options.residence_rules.apply(raw)),
            Field::LuogoDiNascita => options.place_rules.apply(raw),
            Field::Cittadinanza => normalize_citizenship(raw),
            _ => raw.to_string(),
        };
        record.set(binding.field, value);
    }
    record
}
