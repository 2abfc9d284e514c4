//! Data model: the analysis block graph going in and the record coming out.

mod block;
mod record;
mod status;

pub use block::{
    AnalysisResult, Block, BlockType, BoundingBox, DocumentMetadata, Geometry, Point,
    Relationship, RelationshipType, TextType,
};
pub use record::{Field, Record};
pub use status::{CivilStatus, Gender, MaritalStatus, Unresolved, UNRESOLVED_SENTINEL};
