pub mod document;
pub mod operation;
pub mod schema;

use crate::error::ParseError;
use document::Document;

/// Parse a document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a document whose format is not known up front. Input that looks like
/// a JSON object is read as JSON, anything else as YAML.
pub fn from_str(input: &str) -> Result<Document, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}
