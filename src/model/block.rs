//! Block graph returned by the document-analysis service.
//!
//! The wire format is the `AnalyzeDocument` response: a flat list of blocks
//! linked by id through `Relationships`. Unknown keys are ignored and unknown
//! block kinds are kept as [`BlockType::Other`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A full analysis response for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResult {
    /// Page count reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// All blocks, in the order the service emitted them
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl AnalysisResult {
    /// Wrap a list of blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            document_metadata: None,
            blocks,
        }
    }

    /// Parse a response from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a response from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Number of pages, falling back to the highest page seen on a block.
    pub fn page_count(&self) -> u32 {
        self.document_metadata
            .as_ref()
            .map(|m| m.pages)
            .or_else(|| self.blocks.iter().filter_map(|b| b.page).max())
            .unwrap_or(1)
    }
}

/// Document-level metadata of a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Number of analysed pages
    pub pages: u32,
}

/// Kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// Whole page
    Page,
    /// Line of text
    Line,
    /// Single word
    Word,
    /// Detected table
    Table,
    /// Table cell
    Cell,
    /// Merged table cell
    MergedCell,
    /// Form key or value
    KeyValueSet,
    /// Checkbox or radio button
    SelectionElement,
    /// Table title
    TableTitle,
    /// Table footer
    TableFooter,
    /// Signature region
    Signature,
    /// Any kind this crate does not interpret (layout blocks, queries, ...)
    #[serde(other)]
    Other,
}

/// Kind of a relationship between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Containment (TABLE -> CELL -> WORD)
    Child,
    /// Form key -> value
    Value,
    /// Merged cell -> constituent cells
    MergedCell,
    /// Table -> title
    Title,
    /// Query -> answer
    Answer,
    /// Anything else
    #[serde(other)]
    Other,
}

/// Whether a word was printed or handwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextType {
    /// Machine-printed text
    Printed,
    /// Handwriting
    Handwriting,
}

/// An ordered group of related block ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Relationship kind
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Target block ids, in order
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Axis-aligned box in page-relative coordinates (0.0-1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    /// Width as a fraction of page width
    pub width: f64,
    /// Height as a fraction of page height
    pub height: f64,
    /// Left edge as a fraction of page width
    pub left: f64,
    /// Top edge as a fraction of page height
    pub top: f64,
}

impl BoundingBox {
    /// Create a box from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Vertical centre.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// A polygon vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Location of a block on its page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    /// Bounding box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Outline polygon
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygon: Vec<Point>,
}

/// A node of the analysis block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Unique id within the response
    pub id: String,

    /// Block kind
    pub block_type: BlockType,

    /// Recognised text (WORD and LINE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Position on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// 1-based row (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Outgoing relationships
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// Recognition confidence (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Printed or handwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<TextType>,

    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Block {
    /// Create a bare block.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            geometry: None,
            row_index: None,
            column_index: None,
            relationships: Vec::new(),
            confidence: None,
            text_type: None,
            page: None,
        }
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a LINE block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Line).with_text(text)
    }

    /// Create a CELL block at a 1-based grid position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        let mut block = Self::new(id, BlockType::Cell);
        block.row_index = Some(row);
        block.column_index = Some(column);
        block
    }

    /// Create a TABLE block.
    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the bounding box and return self.
    pub fn with_box(mut self, bounding_box: BoundingBox) -> Self {
        self.geometry = Some(Geometry {
            bounding_box: Some(bounding_box),
            polygon: Vec::new(),
        });
        self
    }

    /// Append a CHILD relationship and return self.
    pub fn with_children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.push(Relationship {
            kind: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Check the block kind.
    pub fn is(&self, block_type: BlockType) -> bool {
        self.block_type == block_type
    }

    /// Text of a block that must carry text (WORD, LINE).
    pub fn require_text(&self) -> Result<&str> {
        self.text
            .as_deref()
            .ok_or_else(|| Error::malformed(&self.id, "missing text"))
    }

    /// Bounding box of a block that must carry geometry.
    pub fn require_box(&self) -> Result<&BoundingBox> {
        self.geometry
            .as_ref()
            .and_then(|g| g.bounding_box.as_ref())
            .ok_or_else(|| Error::malformed(&self.id, "missing bounding box"))
    }

    /// Grid position of a CELL block.
    pub fn require_position(&self) -> Result<(u32, u32)> {
        match (self.row_index, self.column_index) {
            (Some(row), Some(column)) => Ok((row, column)),
            _ => Err(Error::malformed(&self.id, "cell without row/column index")),
        }
    }

    /// Ids of all CHILD relationships, in order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "DocumentMetadata": {"Pages": 1},
        "AnalyzeDocumentModelVersion": "1.0",
        "Blocks": [
            {
                "BlockType": "WORD",
                "Id": "w1",
                "Text": "beqar",
                "TextType": "PRINTED",
                "Confidence": 99.1,
                "Page": 1,
                "Geometry": {
                    "BoundingBox": {"Width": 0.05, "Height": 0.02, "Left": 0.6, "Top": 0.4},
                    "Polygon": [{"X": 0.6, "Y": 0.4}]
                }
            },
            {
                "BlockType": "CELL",
                "Id": "c1",
                "RowIndex": 2,
                "ColumnIndex": 2,
                "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]
            },
            {"BlockType": "LAYOUT_TEXT", "Id": "l1"}
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let result = AnalysisResult::from_json(RESPONSE).unwrap();
        assert_eq!(result.page_count(), 1);
        assert_eq!(result.blocks.len(), 3);

        let word = &result.blocks[0];
        assert!(word.is(BlockType::Word));
        assert_eq!(word.require_text().unwrap(), "beqar");
        assert_eq!(word.text_type, Some(TextType::Printed));
        assert!((word.require_box().unwrap().center_y() - 0.41).abs() < 1e-9);

        let cell = &result.blocks[1];
        assert_eq!(cell.require_position().unwrap(), (2, 2));
        assert_eq!(cell.child_ids().collect::<Vec<_>>(), vec!["w1"]);

        assert!(result.blocks[2].is(BlockType::Other));
    }

    #[test]
    fn test_missing_attributes_are_malformed() {
        let word = Block::new("w9", BlockType::Word);
        assert!(matches!(
            word.require_text(),
            Err(Error::MalformedBlock { .. })
        ));
        assert!(matches!(word.require_box(), Err(Error::MalformedBlock { .. })));

        let cell = Block::new("c9", BlockType::Cell);
        assert!(cell.require_position().is_err());
    }

    #[test]
    fn test_child_ids_skip_other_relationships() {
        let mut block = Block::table("t1").with_children(["c1", "c2"]);
        block.relationships.push(Relationship {
            kind: RelationshipType::MergedCell,
            ids: vec!["m1".to_string()],
        });
        assert_eq!(block.child_ids().collect::<Vec<_>>(), vec!["c1", "c2"]);
    }

    #[test]
    fn test_page_count_fallback() {
        let mut word = Block::word("w1", "x");
        word.page = Some(2);
        let result = AnalysisResult::new(vec![word]);
        assert_eq!(result.page_count(), 2);
        assert_eq!(AnalysisResult::default().page_count(), 1);
    }
}
