//! Layout of the Italian translation, independent of the output format.

use chrono::NaiveDate;

use crate::model::{Field, Record};

use super::options::RenderOptions;

/// Country heading.
pub const REPUBLIC: &str = "REPUBBLICA D'ALBANIA";

/// Document title.
pub const TITLE: &str = "CERTIFICATO DI NASCITA";

/// Merged last row of the field table.
pub const SEALED_ROW: &str = "Timbrato elettronicamente dalla Direzione Generale dello Stato Civile";

/// Note on documents issued by the online registry.
pub const SEAL_NOTE: [&str; 3] = [
    "Nota: Questo documento è stato generato e timbrato",
    "da una procedura automatica da un sistema elettronico",
    "(Direzione Generale di Stato Civile)",
];

/// One part of the translation, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Country and issuing office
    Heading {
        /// Country line
        country: String,
        /// Office lines, possibly empty
        office: Vec<String>,
    },
    /// Document title
    Title(String),
    /// Label/value rows followed by a merged footer row
    Fields {
        /// `(label, value)` pairs
        rows: Vec<(String, String)>,
        /// Merged row below the pairs
        footer: String,
    },
    /// Electronic seal lines
    Seal(Vec<String>),
    /// Italic note lines
    Note(Vec<String>),
    /// Translator declaration, one paragraph and its date line
    Declaration {
        /// Declaration paragraph
        text: String,
        /// "In data dd.mm.YYYY."
        date_line: String,
    },
    /// Right-aligned signature lines
    Signature(Vec<String>),
}

/// The translation as an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDocument {
    /// Sections in reading order
    pub sections: Vec<Section>,
}

impl TranslationDocument {
    /// Lay out the translation of `record`.
    pub fn build(record: &Record, options: &RenderOptions) -> Self {
        let mut sections = Vec::new();

        let mut office = Vec::new();
        let comune = record.get(Field::Comune);
        if !comune.is_empty() {
            office.push(format!("Ufficio di Stato Civile Comune di {}", comune));
        }
        let sezione = record.get(Field::Sezione);
        if !sezione.is_empty() {
            office.push(format!("Sezione Amministrativa {}", sezione));
        }
        sections.push(Section::Heading {
            country: REPUBLIC.to_string(),
            office,
        });
        sections.push(Section::Title(TITLE.to_string()));

        sections.push(Section::Fields {
            rows: Field::CIVIL
                .iter()
                .map(|f| (f.key().to_string(), record.get(*f).to_string()))
                .collect(),
            footer: SEALED_ROW.to_string(),
        });

        let seal = record.get(Field::ElectronicSeal);
        if !seal.is_empty() {
            sections.push(Section::Seal(seal.lines().map(str::to_string).collect()));
        }

        if options.include_seal_note {
            sections.push(Section::Note(
                SEAL_NOTE.iter().map(|s| s.to_string()).collect(),
            ));
        }

        if let Some(translator) = &options.translator {
            let (title, participle) = translator.title_and_participle();
            sections.push(Section::Declaration {
                text: format!(
                    "Io, {}, {} ufficiale della lingua italiana {} dal Ministero della \
                     Giustizia con il numero di certificato {} datato {}, dichiaro di aver \
                     tradotto il testo presentatomi dalla lingua albanese all'italiano con \
                     precisione e responsabilità legale.",
                    translator.name,
                    title,
                    participle,
                    translator.certificate_number,
                    dotted(translator.certificate_date)
                ),
                date_line: format!("In data {}.", dotted(options.effective_date())),
            });
            sections.push(Section::Signature(vec![
                "Traduzione eseguita da:".to_string(),
                translator.name.clone(),
            ]));
        }

        Self { sections }
    }
}

/// `dd.mm.YYYY`
pub fn dotted(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
