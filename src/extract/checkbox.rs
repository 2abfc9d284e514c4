//! Civil-status detection from the handwritten checkbox mark.
//!
//! The form prints the four statuses one above the other and the clerk
//! writes an "x" next to one of them. The analysis service returns the
//! labels and the mark as unrelated WORD blocks, so the mark is attributed
//! to the label whose vertical centre is closest to its own.

use crate::error::Result;
use crate::model::{Block, BlockType, CivilStatus, Gender, MaritalStatus, Unresolved};
use crate::normalize::nfc;

use super::index::BlockIndex;

/// Label fragments, matched as lowercase substrings of a word.
pub const STATUS_FRAGMENTS: [(&str, MaritalStatus); 4] = [
    ("beqar", MaritalStatus::Single),
    ("martu", MaritalStatus::Married),
    ("shkuror", MaritalStatus::Divorced),
    ("vedov", MaritalStatus::Widowed),
];

/// Accepted spellings of the handwritten mark.
pub const MARK_TEXTS: [&str; 3] = ["x", "x.", "x,"];

/// A located status label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Status the label stands for
    pub status: MaritalStatus,
    /// Vertical centre of the label word
    pub center_y: f64,
}

/// Determine the civil status marked on the form.
///
/// `sex` is the already normalized sex value ("Maschio", "Femminile", ...)
/// and selects the grammatical gender of the result.
pub fn resolve_civil_status(index: &BlockIndex, sex: &str) -> Result<CivilStatus> {
    let candidates = locate_labels(index)?;
    if candidates.len() < STATUS_FRAGMENTS.len() {
        log::warn!(
            "Civil status: found {} of {} status labels",
            candidates.len(),
            STATUS_FRAGMENTS.len()
        );
        return Ok(CivilStatus::Unresolved {
            cause: Unresolved::MissingLabels {
                found: candidates.len(),
            },
        });
    }

    let Some(mark_y) = locate_mark(index)? else {
        log::warn!("Civil status: no checkbox mark found");
        return Ok(CivilStatus::Unresolved {
            cause: Unresolved::MissingMark,
        });
    };

    let Some(status) = nearest(&candidates, mark_y) else {
        return Ok(CivilStatus::Unresolved {
            cause: Unresolved::MissingLabels { found: 0 },
        });
    };
    log::debug!("Civil status: mark at y={:.4} -> {:?}", mark_y, status);
    Ok(CivilStatus::Resolved {
        status,
        gender: Gender::from_sex(sex),
    })
}

/// Find the first word carrying each status fragment.
///
/// Returns at most one candidate per status, in fragment order.
pub fn locate_labels(index: &BlockIndex) -> Result<Vec<Candidate>> {
    let mut centers: [Option<f64>; 4] = [None; 4];

    for word in index.of_type(BlockType::Word) {
        let text = word_key(word)?;
        for (slot, (fragment, _)) in STATUS_FRAGMENTS.iter().enumerate() {
            if centers[slot].is_none() && text.contains(fragment) {
                centers[slot] = Some(word.require_box()?.center_y());
            }
        }
    }

    Ok(STATUS_FRAGMENTS
        .iter()
        .zip(centers)
        .filter_map(|((_, status), center)| {
            center.map(|center_y| Candidate {
                status: *status,
                center_y,
            })
        })
        .collect())
}

/// Vertical centre of the first word that is a checkbox mark.
pub fn locate_mark(index: &BlockIndex) -> Result<Option<f64>> {
    for word in index.of_type(BlockType::Word) {
        if MARK_TEXTS.contains(&word_key(word)?.as_str()) {
            return word.require_box().map(|b| Some(b.center_y()));
        }
    }
    Ok(None)
}

/// Status whose label centre is closest to `mark_y`.
///
/// Candidates are ordered top to bottom first, so on a tie the upper label
/// wins. `None` only when `candidates` is empty.
pub fn nearest(candidates: &[Candidate], mark_y: f64) -> Option<MaritalStatus> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));
    ordered
        .iter()
        .min_by(|a, b| {
            (a.center_y - mark_y)
                .abs()
                .total_cmp(&(b.center_y - mark_y).abs())
        })
        .map(|c| c.status)
}

fn word_key(word: &Block) -> Result<String> {
    Ok(nfc(word.require_text()?.trim()).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{BoundingBox, UNRESOLVED_SENTINEL};

    fn word_at(id: &str, text: &str, top: f64) -> Block {
        Block::word(id, text).with_box(BoundingBox::new(0.6, top, 0.08, 0.02))
    }

    fn labels() -> Vec<Block> {
        vec![
            word_at("l0", "Beqar/e", 0.50),
            word_at("l1", "I/E martuar", 0.54),
            word_at("l2", "Shkurorëzuar", 0.58),
            word_at("l3", "Vedov/e", 0.62),
        ]
    }

    #[test]
    fn test_divorced_feminine() {
        let mut blocks = labels();
        blocks.push(word_at("x", "X", 0.583));
        let index = BlockIndex::new(blocks);
        let status = resolve_civil_status(&index, "Femminile").unwrap();
        assert_eq!(status.to_field_value(), "Divorziata");
    }

    #[test]
    fn test_single_masculine_and_unknown_gender() {
        let mut blocks = labels();
        blocks.push(word_at("x", "x.", 0.495));
        let index = BlockIndex::new(blocks);
        assert_eq!(
            resolve_civil_status(&index, "Maschio").unwrap().to_field_value(),
            "Celibe"
        );
        assert_eq!(
            resolve_civil_status(&index, "").unwrap().to_field_value(),
            "Celibe / Nubile"
        );
    }

    #[test]
    fn test_missing_label_is_unresolved_even_with_mark() {
        let mut blocks = labels();
        blocks.remove(3);
        blocks.push(word_at("x", "x", 0.5));
        let index = BlockIndex::new(blocks);
        let status = resolve_civil_status(&index, "Femminile").unwrap();
        assert_eq!(
            status,
            CivilStatus::Unresolved {
                cause: Unresolved::MissingLabels { found: 3 }
            }
        );
        assert_eq!(status.to_field_value(), UNRESOLVED_SENTINEL);
    }

    #[test]
    fn test_missing_mark_is_unresolved() {
        let index = BlockIndex::new(labels());
        assert_eq!(
            resolve_civil_status(&index, "Maschio").unwrap(),
            CivilStatus::Unresolved {
                cause: Unresolved::MissingMark
            }
        );
    }

    #[test]
    fn test_first_occurrence_of_fragment_wins() {
        let mut blocks = labels();
        blocks.push(word_at("dup", "beqare", 0.9));
        blocks.push(word_at("x", "x,", 0.88));
        let index = BlockIndex::new(blocks);
        // The later "beqare" at 0.9 is ignored, so the widowed label is nearest.
        assert_eq!(
            resolve_civil_status(&index, "F").unwrap().status(),
            Some(MaritalStatus::Widowed)
        );
    }

    #[test]
    fn test_first_mark_in_block_order_wins() {
        let mut blocks = labels();
        blocks.push(word_at("x1", "x", 0.54));
        blocks.push(word_at("x2", "x", 0.62));
        let index = BlockIndex::new(blocks);
        let mark_y = locate_mark(&index).unwrap().unwrap();
        assert!((mark_y - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_upper_label() {
        let candidates = [
            Candidate {
                status: MaritalStatus::Married,
                center_y: 0.75,
            },
            Candidate {
                status: MaritalStatus::Single,
                center_y: 0.25,
            },
        ];
        assert_eq!(nearest(&candidates, 0.5), Some(MaritalStatus::Single));
        assert_eq!(nearest(&[], 0.5), None);
    }

    #[test]
    fn test_mark_without_geometry_is_malformed() {
        let mut blocks = labels();
        blocks.push(Block::word("x", "x"));
        let index = BlockIndex::new(blocks);
        assert!(matches!(
            resolve_civil_status(&index, "F"),
            Err(Error::MalformedBlock { .. })
        ));
    }

    #[test]
    fn test_unrelated_words_need_no_geometry() {
        let mut blocks = labels();
        blocks.insert(0, Block::word("n", "Emri"));
        blocks.push(word_at("x", "x", 0.62));
        let index = BlockIndex::new(blocks);
        assert_eq!(
            resolve_civil_status(&index, "Maschio").unwrap().to_field_value(),
            "Vedovo"
        );
    }
}
