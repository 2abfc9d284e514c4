//! The flat record handed to the renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named output field.
///
/// Variants are declared in rendering order; the serialized name is the
/// key the translation template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Given name
    #[serde(rename = "Nome")]
    Nome,
    /// Surname
    #[serde(rename = "Cognome")]
    Cognome,
    /// Personal identification number
    #[serde(rename = "Numero personale")]
    NumeroPersonale,
    /// Father's name
    #[serde(rename = "Nome del padre")]
    NomeDelPadre,
    /// Mother's name
    #[serde(rename = "Nome della madre")]
    NomeDellaMadre,
    /// Date of birth
    #[serde(rename = "Data di nascita")]
    DataDiNascita,
    /// Place of birth
    #[serde(rename = "Luogo di nascita")]
    LuogoDiNascita,
    /// Residence
    #[serde(rename = "Residenza")]
    Residenza,
    /// Sex
    #[serde(rename = "Sesso")]
    Sesso,
    /// Civil status
    #[serde(rename = "Stato Civile")]
    StatoCivile,
    /// Citizenship
    #[serde(rename = "Cittadinanza")]
    Cittadinanza,
    /// Surname before marriage
    #[serde(rename = "Cognome prima del matrimonio")]
    CognomePrimaDelMatrimonio,
    /// Issue date
    #[serde(rename = "Data del rilascio")]
    DataDelRilascio,
    /// Electronic seal footer
    #[serde(rename = "ElectronicSeal")]
    ElectronicSeal,
    /// Issuing municipality
    #[serde(rename = "Comune")]
    Comune,
    /// Administrative unit
    #[serde(rename = "Sezione")]
    Sezione,
}

impl Field {
    /// Every field, in rendering order.
    pub const ALL: [Field; 16] = [
        Field::Nome,
        Field::Cognome,
        Field::NumeroPersonale,
        Field::NomeDelPadre,
        Field::NomeDellaMadre,
        Field::DataDiNascita,
        Field::LuogoDiNascita,
        Field::Residenza,
        Field::Sesso,
        Field::StatoCivile,
        Field::Cittadinanza,
        Field::CognomePrimaDelMatrimonio,
        Field::DataDelRilascio,
        Field::ElectronicSeal,
        Field::Comune,
        Field::Sezione,
    ];

    /// Fields shown in the label/value table of the translation.
    pub const CIVIL: [Field; 13] = [
        Field::Nome,
        Field::Cognome,
        Field::NumeroPersonale,
        Field::NomeDelPadre,
        Field::NomeDellaMadre,
        Field::DataDiNascita,
        Field::LuogoDiNascita,
        Field::Residenza,
        Field::Sesso,
        Field::StatoCivile,
        Field::Cittadinanza,
        Field::CognomePrimaDelMatrimonio,
        Field::DataDelRilascio,
    ];

    /// Record key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Nome => "Nome",
            Field::Cognome => "Cognome",
            Field::NumeroPersonale => "Numero personale",
            Field::NomeDelPadre => "Nome del padre",
            Field::NomeDellaMadre => "Nome della madre",
            Field::DataDiNascita => "Data di nascita",
            Field::LuogoDiNascita => "Luogo di nascita",
            Field::Residenza => "Residenza",
            Field::Sesso => "Sesso",
            Field::StatoCivile => "Stato Civile",
            Field::Cittadinanza => "Cittadinanza",
            Field::CognomePrimaDelMatrimonio => "Cognome prima del matrimonio",
            Field::DataDelRilascio => "Data del rilascio",
            Field::ElectronicSeal => "ElectronicSeal",
            Field::Comune => "Comune",
            Field::Sezione => "Sezione",
        }
    }

    /// Look a field up by its record key.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Extracted fields of one certificate.
///
/// A record produced by full extraction holds every [`Field`]; values that
/// could not be read are empty strings. Serializes as a JSON object whose
/// keys follow [`Field::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<Field, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record holding every field with an empty value.
    pub fn blank() -> Self {
        let mut record = Self::new();
        record.complete();
        record
    }

    /// Value of a field, empty if absent.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Set a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Whether the field is present (possibly empty).
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no field is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Insert an empty value for every absent field.
    pub fn complete(&mut self) {
        for field in Field::ALL {
            self.values.entry(field).or_default();
        }
    }

    /// Check if every field is present.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.values.contains_key(f))
    }

    /// Iterate present fields in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}
