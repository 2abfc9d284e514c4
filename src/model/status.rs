//! Civil status outcome of the checkbox resolver.

use serde::{Deserialize, Serialize};

/// Field value written when the civil status cannot be determined.
pub const UNRESOLVED_SENTINEL: &str = "[X] Stato non riconosciuto";

/// The four printed statuses, in the order they appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    /// beqar / beqare
    Single,
    /// i martuar / e martuar
    Married,
    /// i shkurorëzuar
    Divorced,
    /// vedov / vejusha
    Widowed,
}

impl MaritalStatus {
    /// Italian masculine form.
    pub fn masculine(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Celibe",
            MaritalStatus::Married => "Coniugato",
            MaritalStatus::Divorced => "Divorziato",
            MaritalStatus::Widowed => "Vedovo",
        }
    }

    /// Italian feminine form.
    pub fn feminine(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Nubile",
            MaritalStatus::Married => "Coniugata",
            MaritalStatus::Divorced => "Divorziata",
            MaritalStatus::Widowed => "Vedova",
        }
    }

    /// Italian word agreeing with `gender`; both forms when the gender is unknown.
    pub fn italian(&self, gender: Gender) -> String {
        match gender {
            Gender::Female => self.feminine().to_string(),
            Gender::Male => self.masculine().to_string(),
            Gender::Unknown => format!("{} / {}", self.masculine(), self.feminine()),
        }
    }
}

/// Grammatical gender used to inflect the status word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Masculine
    Male,
    /// Feminine
    Female,
    /// Not determined
    #[default]
    Unknown,
}

impl Gender {
    /// Gender from a sex value ("Maschio", "Femminile", "M", "f", ...).
    ///
    /// Only the first letter counts, case-insensitively.
    pub fn from_sex(value: &str) -> Self {
        match value.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('f') => Gender::Female,
            Some('m') => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

/// Why the resolver gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unresolved {
    /// Not all four status labels were found among the words.
    MissingLabels {
        /// How many labels were found
        found: usize,
    },
    /// The labels were found but no handwritten mark was.
    MissingMark,
}

/// Result of civil-status detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CivilStatus {
    /// The mark was attributed to a label.
    Resolved {
        /// Marked status
        status: MaritalStatus,
        /// Gender used for the Italian word
        gender: Gender,
    },
    /// The form could not be read.
    Unresolved {
        /// Cause
        cause: Unresolved,
    },
}

impl CivilStatus {
    /// Check if a status was determined.
    pub fn is_resolved(&self) -> bool {
        matches!(self, CivilStatus::Resolved { .. })
    }

    /// The determined status, if any.
    pub fn status(&self) -> Option<MaritalStatus> {
        match self {
            CivilStatus::Resolved { status, .. } => Some(*status),
            CivilStatus::Unresolved { .. } => None,
        }
    }

    /// Value written into the record.
    pub fn to_field_value(&self) -> String {
        match self {
            CivilStatus::Resolved { status, gender } => status.italian(*gender),
            CivilStatus::Unresolved { .. } => UNRESOLVED_SENTINEL.to_string(),
        }
    }
}

impl std::fmt::Display for CivilStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_field_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_sex() {
        assert_eq!(Gender::from_sex("Femminile"), Gender::Female);
        assert_eq!(Gender::from_sex("f"), Gender::Female);
        assert_eq!(Gender::from_sex("Maschio"), Gender::Male);
        assert_eq!(Gender::from_sex("MASCHIO"), Gender::Male);
        assert_eq!(Gender::from_sex(""), Gender::Unknown);
        assert_eq!(Gender::from_sex("X"), Gender::Unknown);
    }

    #[test]
    fn test_italian_forms() {
        assert_eq!(MaritalStatus::Single.italian(Gender::Female), "Nubile");
        assert_eq!(MaritalStatus::Single.italian(Gender::Male), "Celibe");
        assert_eq!(
            MaritalStatus::Widowed.italian(Gender::Unknown),
            "Vedovo / Vedova"
        );
    }

    #[test]
    fn test_field_value() {
        let resolved = CivilStatus::Resolved {
            status: MaritalStatus::Divorced,
            gender: Gender::Female,
        };
        assert_eq!(resolved.to_field_value(), "Divorziata");
        assert!(resolved.is_resolved());

        let unresolved = CivilStatus::Unresolved {
            cause: Unresolved::MissingMark,
        };
        assert_eq!(unresolved.to_string(), UNRESOLVED_SENTINEL);
        assert_eq!(unresolved.status(), None);
    }
}
