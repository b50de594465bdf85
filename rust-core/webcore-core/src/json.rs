//! # JSON Document Codec
//!
//! Decodes the flat-file document with simd-json and encodes it with
//! serde_json (simd-json is primarily for parsing).

use crate::error::{Error, Result};
use crate::value::Document;
use serde::Serialize;
use std::path::Path;

/// Decode a flat-file document
///
/// Empty or whitespace-only input is an empty document.
///
/// # Errors
///
/// Returns `Error::MalformedDocument` if the bytes are not an object whose
/// values are arrays of flat objects of scalars.
pub fn parse_document(path: &Path, bytes: &mut [u8]) -> Result<Document> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }

    simd_json::from_slice(bytes).map_err(|e| Error::MalformedDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize a value to JSON string
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize a value to pretty-printed JSON string
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn parse(json: &str) -> Result<Document> {
        let mut bytes = json.as_bytes().to_vec();
        parse_document(Path::new("test.json"), &mut bytes)
    }

    #[test]
    fn test_parse_document() {
        let doc = parse(r#"{"articles": [{"id": 1, "title": "A"}], "pages": []}"#).unwrap();
        assert_eq!(doc["articles"].len(), 1);
        assert_eq!(doc["articles"][0]["title"], Value::from("A"));
        assert!(doc["pages"].is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_wrong_shape() {
        let err = parse(r#"{"articles": {"0": {"id": 1}}}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
        assert!(parse("[1, 2, 3]").is_err());
        assert!(parse("not valid json").is_err());
    }

    #[test]
    fn test_to_json_pretty_keeps_arrays() {
        let mut doc = Document::new();
        doc.insert("empty".to_string(), Vec::new());
        let json = to_json_pretty(&doc).unwrap();
        assert!(json.contains("\"empty\": []"));
        assert_eq!(to_json(&doc).unwrap(), r#"{"empty":[]}"#);
    }
}
