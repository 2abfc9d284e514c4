//! Plain text rendering of the translation.

use crate::error::Result;
use crate::model::Record;

use super::document::{Section, TranslationDocument};
use super::RenderOptions;

/// Render the translation of a record as plain text.
///
/// Field labels are padded to a common width; multi-line values continue
/// under the value column.
pub fn to_text(record: &Record, options: &RenderOptions) -> Result<String> {
    let doc = TranslationDocument::build(record, options);
    let mut output = String::new();

    for section in &doc.sections {
        match section {
            Section::Heading { country, office } => {
                output.push_str(country);
                output.push('\n');
                for line in office {
                    output.push_str(line);
                    output.push('\n');
                }
            }
            Section::Title(title) => {
                output.push_str(&format!("{:^width$}\n", title, width = RULE_WIDTH));
            }
            Section::Fields { rows, footer } => {
                let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
                output.push_str(&"-".repeat(RULE_WIDTH));
                output.push('\n');
                for (label, value) in rows {
                    let mut lines = value.lines();
                    let first = lines.next().unwrap_or("");
                    output.push_str(&format!("{:<width$}  {}", label, first, width = width));
                    output.push('\n');
                    for more in lines {
                        output.push_str(&format!("{:width$}  {}\n", "", more, width = width));
                    }
                }
                output.push_str(footer);
                output.push('\n');
                output.push_str(&"-".repeat(RULE_WIDTH));
                output.push('\n');
            }
            Section::Seal(lines) | Section::Note(lines) => {
                for line in lines {
                    output.push_str(line);
                    output.push('\n');
                }
            }
            Section::Declaration { text, date_line } => {
                output.push_str(text);
                output.push('\n');
                output.push_str(date_line);
                output.push('\n');
            }
            Section::Signature(lines) => {
                for line in lines {
                    output.push_str(&format!("{:>width$}\n", line, width = RULE_WIDTH));
                }
            }
        }
        output.push('\n');
    }

    Ok(output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string())
}

const RULE_WIDTH: usize = 72;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_to_text() {
        let mut record = Record::blank();
        record.set(Field::Nome, "Arta");
        record.set(Field::Cognome, "Hoxha");
        record.set(Field::ElectronicSeal, "Timbro\nIn data 2023/05/10");

        let text = to_text(&record, &RenderOptions::new()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "REPUBBLICA D'ALBANIA");
        assert!(text.contains("CERTIFICATO DI NASCITA"));
        // Labels are padded to "Cognome prima del matrimonio".
        assert!(lines.contains(&"Nome                          Arta"));
        assert!(lines.contains(&"Cognome                       Hoxha"));
        assert!(lines.contains(&"Sesso"));
        assert!(text.contains("Timbro\nIn data 2023/05/10"));
        assert!(text.ends_with("(Direzione Generale di Stato Civile)"));
    }

    #[test]
    fn test_multiline_value() {
        let mut record = Record::blank();
        record.set(Field::Residenza, "Rruga 1\nTirana");
        let text = to_text(&record, &RenderOptions::new().with_seal_note(false)).unwrap();
        assert!(text.contains("Residenza                     Rruga 1\n                              Tirana"));
    }
}
