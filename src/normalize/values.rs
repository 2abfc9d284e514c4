//! Single-value normalizers: sex, citizenship and header casing.

/// Spellings of "Albanian" that are rendered as the Italian adjective.
const ALBANIAN_CITIZENSHIP: &[&str] = &[
    "ALB",
    "ALBANIA",
    "ALBANIAN",
    "SHQIPTAR",
    "SHQIPTARE",
    "SHQIPËRI",
    "SHQIPERI",
];

/// Italian adjective for Albanian citizenship.
pub const ALBANESE: &str = "Albanese";

/// Map the single-letter sex code to its Italian word.
///
/// "M" and "F" (any case, surrounding whitespace ignored) become "Maschio"
/// and "Femminile"; any other value is returned trimmed.
pub fn normalize_sex(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.to_uppercase().as_str() {
        "M" => "Maschio".to_string(),
        "F" => "Femminile".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Replace known spellings of "Albanian" with "Albanese".
pub fn normalize_citizenship(value: &str) -> String {
    let key = value.trim().to_uppercase();
    if ALBANIAN_CITIZENSHIP.contains(&key.as_str()) {
        ALBANESE.to_string()
    } else {
        value.to_string()
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// "NR.5" becomes "Nr.5" and "KUÇOVË" becomes "Kuçovë".
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}
