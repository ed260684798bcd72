//! Serialized shapes of persisted records.

mod records;

pub use records::{CourseDto, RecordDocumentDto, SemesterDto, SessionDto};

use cgpa_core::error::Result;
use cgpa_core::record::RecordState;

/// Encodes a record state as a JSON document.
pub fn encode_document(state: &RecordState) -> Result<String> {
    Ok(serde_json::to_string(&RecordDocumentDto::from(state))?)
}

/// Decodes a JSON document into a record state.
pub fn decode_document(content: &str) -> Result<RecordState> {
    let dto: RecordDocumentDto = serde_json::from_str(content)?;
    Ok(dto.into_domain())
}
