//! Output file and directory names.

use chrono::NaiveDate;

use crate::model::{Field, Record};

/// File name (without extension) of a translated certificate:
/// `<Nome>_<Cognome>_Certificato_di_Nascita_<dd-mm-YYYY>`.
///
/// Spaces become underscores; an empty name part is replaced by its label.
///
/// ```
/// use albcert::model::{Field, Record};
/// use albcert::render::output_file_stem;
/// use chrono::NaiveDate;
///
/// let mut record = Record::blank();
/// record.set(Field::Nome, "Anna Maria");
/// record.set(Field::Cognome, "Hoxha");
/// let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
/// assert_eq!(
///     output_file_stem(&record, date),
///     "Anna_Maria_Hoxha_Certificato_di_Nascita_09-03-2025"
/// );
/// ```
pub fn output_file_stem(record: &Record, date: NaiveDate) -> String {
    format!(
        "{}_{}_Certificato_di_Nascita_{}",
        name_part(record.get(Field::Nome), "Nome"),
        name_part(record.get(Field::Cognome), "Cognome"),
        date.format("%d-%m-%Y")
    )
}

/// Directory collecting a batch of translations:
/// `certificati_tradotti_<YYYY-MM-DD>`.
pub fn batch_dir_name(date: NaiveDate) -> String {
    format!("certificati_tradotti_{}", date.format("%Y-%m-%d"))
}

fn name_part(value: &str, fallback: &str) -> String {
    let value = value.trim();
    let value = if value.is_empty() { fallback } else { value };
    value
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    #[test]
    fn test_empty_names_fall_back() {
        assert_eq!(
            output_file_stem(&Record::blank(), date()),
            "Nome_Cognome_Certificato_di_Nascita_01-12-2024"
        );
    }

    #[test]
    fn test_separators_are_replaced() {
        let mut record = Record::new();
        record.set(Field::Nome, " Ana/Maria ");
        record.set(Field::Cognome, "Kola");
        assert_eq!(
            output_file_stem(&record, date()),
            "Ana_Maria_Kola_Certificato_di_Nascita_01-12-2024"
        );
    }

    #[test]
    fn test_batch_dir_name() {
        assert_eq!(batch_dir_name(date()), "certificati_tradotti_2024-12-01");
    }
}
