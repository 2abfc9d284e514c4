//! Id and type lookup over one document's blocks.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{AnalysisResult, Block, BlockType};
use crate::normalize::nfc;

/// Owns the blocks of one document and resolves ids and kinds.
///
/// Built once per document in a single pass. No validation happens here;
/// consumers check for the kinds and attributes they need.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    blocks: Vec<Block>,
    by_id: HashMap<String, usize>,
    by_type: HashMap<BlockType, Vec<usize>>,
}

impl BlockIndex {
    /// Index a list of blocks. A repeated id resolves to its last occurrence.
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut by_id = HashMap::with_capacity(blocks.len());
        let mut by_type: HashMap<BlockType, Vec<usize>> = HashMap::new();

        for (pos, block) in blocks.iter().enumerate() {
            by_id.insert(block.id.clone(), pos);
            by_type.entry(block.block_type).or_default().push(pos);
        }

        log::debug!(
            "BlockIndex: {} blocks, {} distinct ids, {} kinds",
            blocks.len(),
            by_id.len(),
            by_type.len()
        );

        Self {
            blocks,
            by_id,
            by_type,
        }
    }

    /// Index the blocks of an analysis response.
    pub fn from_result(result: AnalysisResult) -> Self {
        Self::new(result.blocks)
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look a block up by id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.by_id.get(id).map(|&pos| &self.blocks[pos])
    }

    /// Look up a referenced block; a dangling reference is malformed input.
    pub fn require(&self, id: &str) -> Result<&Block> {
        self.get(id).ok_or_else(|| Error::MissingBlock(id.to_string()))
    }

    /// Blocks of one kind, in document order.
    pub fn of_type(&self, block_type: BlockType) -> impl Iterator<Item = &Block> + '_ {
        self.by_type
            .get(&block_type)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.blocks[pos])
    }

    /// First block of one kind.
    pub fn first_of_type(&self, block_type: BlockType) -> Option<&Block> {
        self.of_type(block_type).next()
    }

    /// Number of blocks of one kind.
    pub fn count(&self, block_type: BlockType) -> usize {
        self.by_type.get(&block_type).map_or(0, Vec::len)
    }

    /// Resolve the CHILD relationships of `block`, in order.
    pub fn children<'a>(&'a self, block: &'a Block) -> impl Iterator<Item = Result<&'a Block>> + 'a {
        block.child_ids().map(move |id| self.require(id))
    }

    /// Texts of all LINE blocks in document order, composed to NFC.
    pub fn line_texts(&self) -> Result<Vec<String>> {
        self.of_type(BlockType::Line)
            .map(|line| line.require_text().map(nfc))
            .collect()
    }
}

impl From<AnalysisResult> for BlockIndex {
    fn from(result: AnalysisResult) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlockIndex {
        BlockIndex::new(vec![
            Block::line("l1", "REPUBLIKA E SHQIPËRISË"),
            Block::table("t1").with_children(["c1"]),
            Block::cell("c1", 2, 2).with_children(["w1", "w2"]),
            Block::word("w1", "Arta"),
            Block::word("w2", "Elira"),
            Block::line("l2", "Bashkia Tiranë"),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let index = sample();
        assert_eq!(index.len(), 6);
        assert_eq!(index.get("w2").unwrap().text.as_deref(), Some("Elira"));
        assert!(index.get("nope").is_none());
        assert!(matches!(index.require("nope"), Err(Error::MissingBlock(id)) if id == "nope"));
    }

    #[test]
    fn test_grouping_preserves_order() {
        let index = sample();
        let words: Vec<_> = index
            .of_type(BlockType::Word)
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(words, vec!["w1", "w2"]);
        assert_eq!(index.count(BlockType::Line), 2);
        assert_eq!(index.count(BlockType::Page), 0);
        assert_eq!(index.first_of_type(BlockType::Table).unwrap().id, "t1");
    }

    #[test]
    fn test_children() {
        let index = sample();
        let cell = index.get("c1").unwrap();
        let texts: Vec<_> = index
            .children(cell)
            .map(|b| b.unwrap().text.clone().unwrap())
            .collect();
        assert_eq!(texts, vec!["Arta", "Elira"]);
    }

    #[test]
    fn test_dangling_child_is_an_error() {
        let index = BlockIndex::new(vec![Block::table("t1").with_children(["ghost"])]);
        let table = index.get("t1").unwrap();
        let first = index.children(table).next().unwrap();
        assert!(first.is_err());
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let index = BlockIndex::new(vec![Block::word("w", "first"), Block::word("w", "second")]);
        assert_eq!(index.get("w").unwrap().text.as_deref(), Some("second"));
        assert_eq!(index.count(BlockType::Word), 2);
    }

    #[test]
    fn test_line_texts() {
        let index = sample();
        assert_eq!(
            index.line_texts().unwrap(),
            vec!["REPUBLIKA E SHQIPËRISË", "Bashkia Tiranë"]
        );

        let broken = BlockIndex::new(vec![Block::new("l1", BlockType::Line)]);
        assert!(broken.line_texts().is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = BlockIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.of_type(BlockType::Word).count(), 0);
    }
}
