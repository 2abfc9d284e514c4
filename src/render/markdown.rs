//! Markdown rendering of the translation.

use crate::error::Result;
use crate::model::Record;

use super::document::{Section, TranslationDocument};
use super::RenderOptions;

/// Render the translation of a record as Markdown.
pub fn to_markdown(record: &Record, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(record)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a record to Markdown.
    pub fn render(&self, record: &Record) -> Result<String> {
        let doc = TranslationDocument::build(record, &self.options);
        Ok(self.render_document(&doc))
    }

    /// Render an already laid out translation.
    pub fn render_document(&self, doc: &TranslationDocument) -> String {
        let mut output = String::new();
        for section in &doc.sections {
            self.render_section(&mut output, section);
        }
        output.trim().to_string()
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        match section {
            Section::Heading { country, office } => {
                output.push_str(&format!("**{}**\n\n", country));
                if !office.is_empty() {
                    let lines: Vec<_> = office
                        .iter()
                        .map(|l| format!("**{}**", self.escape(l)))
                        .collect();
                    output.push_str(&lines.join("  \n"));
                    output.push_str("\n\n");
                }
            }
            Section::Title(title) => {
                output.push_str(&format!("## {}\n\n", title));
            }
            Section::Fields { rows, footer } => self.render_table(output, rows, footer),
            Section::Seal(lines) => {
                let lines: Vec<_> = lines.iter().map(|l| self.escape(l)).collect();
                output.push_str(&lines.join("  \n"));
                output.push_str("\n\n");
            }
            Section::Note(lines) => {
                let lines: Vec<_> = lines.iter().map(|l| format!("*{}*", l)).collect();
                output.push_str(&lines.join("  \n"));
                output.push_str("\n\n");
            }
            Section::Declaration { text, date_line } => {
                output.push_str(&format!("> {}  \n> {}\n\n", self.escape(text), date_line));
            }
            Section::Signature(lines) => {
                let lines: Vec<_> = lines.iter().map(|l| self.escape(l)).collect();
                output.push_str(&lines.join("  \n"));
                output.push_str("\n\n");
            }
        }
    }

    fn render_table(&self, output: &mut String, rows: &[(String, String)], footer: &str) {
        for (i, (label, value)) in rows.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} |\n",
                label,
                self.cell(value)
            ));
            // The first pair doubles as the header row.
            if i == 0 {
                output.push_str("| --- | :---: |\n");
            }
        }
        output.push_str(&format!("| {} | |\n\n", footer));
    }

    fn cell(&self, value: &str) -> String {
        let flat = value.replace('\n', " ");
        self.escape(flat.trim())
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape characters that would be read as Markdown syntax inside a line.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, UNRESOLVED_SENTINEL};

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("[X] Stato"), "\\[X\\] Stato");
        assert_eq!(escape_markdown("Nome_Cognome"), "Nome\\_Cognome");
        assert_eq!(escape_markdown("Nr. 5 (Tirana)"), "Nr. 5 (Tirana)");
    }

    #[test]
    fn test_render_table() {
        let mut record = Record::blank();
        record.set(Field::Nome, "Arta");
        record.set(Field::StatoCivile, UNRESOLVED_SENTINEL);

        let md = to_markdown(&record, &RenderOptions::new()).unwrap();
        assert!(md.starts_with("**REPUBBLICA D'ALBANIA**"));
        assert!(md.contains("## CERTIFICATO DI NASCITA"));
        assert!(md.contains("| Nome | Arta |\n| --- | :---: |\n| Cognome |  |"));
        assert!(md.contains("| Stato Civile | \\[X\\] Stato non riconosciuto |"));
        assert!(md.contains(
            "| Timbrato elettronicamente dalla Direzione Generale dello Stato Civile | |"
        ));
        assert!(md.contains("*Nota: Questo documento è stato generato e timbrato*"));
    }

    #[test]
    fn test_without_escaping_or_note() {
        let mut record = Record::blank();
        record.set(Field::Comune, "Tirana");
        record.set(Field::Sezione, "Nr_1");
        let options = RenderOptions::new().with_escaping(false).with_seal_note(false);
        let md = to_markdown(&record, &options).unwrap();
        assert!(md.contains(
            "**Ufficio di Stato Civile Comune di Tirana**  \n**Sezione Amministrativa Nr_1**"
        ));
        assert!(!md.contains("Nota:"));
        assert!(md.ends_with("| |"));
    }
}
