//! Rendering options and configuration.

use chrono::{Local, NaiveDate};

use crate::model::Gender;

/// Options for rendering the Italian translation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Sworn translator; adds the declaration and signature when set
    pub translator: Option<TranslatorInfo>,

    /// Translation date (defaults to today)
    pub date: Option<NaiveDate>,

    /// Include the note about the automatic issuing procedure
    pub include_seal_note: bool,

    /// Escape special Markdown characters in field values
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translator.
    pub fn with_translator(mut self, translator: TranslatorInfo) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Fix the translation date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Enable or disable the issuing-procedure note.
    pub fn with_seal_note(mut self, include: bool) -> Self {
        self.include_seal_note = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// The translation date, today if none was set.
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            translator: None,
            date: None,
            include_seal_note: true,
            escape_special_chars: true,
        }
    }
}

/// A sworn translator registered with the Ministry of Justice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorInfo {
    /// Full name as it appears on the signature
    pub name: String,

    /// Registration certificate number
    pub certificate_number: String,

    /// Registration certificate date
    pub certificate_date: NaiveDate,

    /// Grammatical gender of the declaration
    pub gender: Gender,
}

impl TranslatorInfo {
    /// Create translator details with a gender-neutral declaration.
    pub fn new(
        name: impl Into<String>,
        certificate_number: impl Into<String>,
        certificate_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            certificate_number: certificate_number.into(),
            certificate_date,
            gender: Gender::Unknown,
        }
    }

    /// Set the grammatical gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// "traduttore"/"traduttrice" and the matching participle.
    pub(crate) fn title_and_participle(&self) -> (&'static str, &'static str) {
        match self.gender {
            Gender::Male => ("traduttore", "certificato"),
            Gender::Female => ("traduttrice", "certificata"),
            Gender::Unknown => ("traduttore/traduttrice", "certificato/a"),
        }
    }
}
