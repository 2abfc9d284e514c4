//! Rendering of extracted records.

use albcert::model::{Field, Gender, Record, UNRESOLVED_SENTINEL};
use albcert::render::{
    batch_dir_name, output_file_stem, to_json, to_markdown, to_text, JsonFormat, RenderOptions,
    TranslatorInfo,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_record() -> Record {
    let mut record = Record::blank();
    record.set(Field::Nome, "Arta");
    record.set(Field::Cognome, "Hoxha");
    record.set(Field::Sesso, "Femminile");
    record.set(Field::StatoCivile, "Nubile");
    record.set(Field::Cittadinanza, "Albanese");
    record.set(Field::Comune, "Tirana");
    record.set(
        Field::ElectronicSeal,
        "Timbro elettronico della Direzione\nGenerale dello Stato Civile\nIn data 2023/05/10\nabc",
    );
    record
}

fn sworn_options() -> RenderOptions {
    RenderOptions::new()
        .with_date(date(2025, 4, 3))
        .with_translator(
            TranslatorInfo::new("Ana Rossi", "412", date(2024, 7, 31)).with_gender(Gender::Female),
        )
}

#[test]
fn test_markdown_translation() {
    let md = to_markdown(&sample_record(), &sworn_options()).unwrap();

    let republic = md.find("**REPUBBLICA D'ALBANIA**").unwrap();
    let office = md.find("**Ufficio di Stato Civile Comune di Tirana**").unwrap();
    let title = md.find("## CERTIFICATO DI NASCITA").unwrap();
    let table = md.find("| Nome | Arta |").unwrap();
    let seal = md.find("In data 2023/05/10").unwrap();
    let note = md.find("*Nota:").unwrap();
    let declaration = md.find("> Io, Ana Rossi, traduttrice ufficiale").unwrap();
    let signature = md.find("Traduzione eseguita da:").unwrap();
    assert!(republic < office && office < title && title < table);
    assert!(table < seal && seal < note && note < declaration && declaration < signature);

    assert!(!md.contains("Sezione Amministrativa"));
    assert!(md.contains("| Stato Civile | Nubile |"));
    // The seal is not a table field.
    assert!(!md.contains("| ElectronicSeal |"));
    assert!(md.contains("> In data 03.04.2025."));
    assert!(md.ends_with("Ana Rossi"));
}

#[test]
fn test_text_translation() {
    let text = to_text(&sample_record(), &sworn_options()).unwrap();
    assert!(text.starts_with("REPUBBLICA D'ALBANIA\nUfficio di Stato Civile Comune di Tirana"));
    assert!(text.contains("Timbrato elettronicamente dalla Direzione Generale dello Stato Civile"));
    assert!(text.contains("datato 31.07.2024"));
    assert!(text.contains("In data 03.04.2025."));
    assert!(text.lines().all(|l| l == l.trim_end()));
}

#[test]
fn test_sentinel_is_rendered_verbatim_in_text() {
    let mut record = sample_record();
    record.set(Field::StatoCivile, UNRESOLVED_SENTINEL);
    let text = to_text(&record, &RenderOptions::new()).unwrap();
    assert!(text.contains(UNRESOLVED_SENTINEL));
    let md = to_markdown(&record, &RenderOptions::new()).unwrap();
    assert!(md.contains("\\[X\\] Stato non riconosciuto"));
}

#[test]
fn test_json_keys_in_order() {
    let json = to_json(&sample_record(), JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 16);
    assert_eq!(object["Numero personale"], "");
    assert_eq!(object["Stato Civile"], "Nubile");

    let positions: Vec<_> = Field::ALL
        .iter()
        .map(|f| json.find(&format!("\"{}\"", f.key())).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_output_names() {
    let record = sample_record();
    assert_eq!(
        output_file_stem(&record, date(2025, 4, 3)),
        "Arta_Hoxha_Certificato_di_Nascita_03-04-2025"
    );
    assert_eq!(batch_dir_name(date(2025, 4, 3)), "certificati_tradotti_2025-04-03");
}
