//! Error types for descriptor decoding, encoding and validation.

use thiserror::Error;

use crate::model::SchemaVersion;

/// Broad error classes a caller can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// E001: Unexpected token shape, malformed JSON, or an out-of-range value
    Structural,
    /// E002: A field that must always be present is absent
    MissingRequiredField,
    /// E003: A symbolic value outside its declared set
    UnknownEnumValue,
    /// E004: Version tag matching none of the known generations
    UnsupportedVersion,
    /// E005: Fixed-length numeric array of the wrong length
    Arity,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "E001",
            ErrorKind::MissingRequiredField => "E002",
            ErrorKind::UnknownEnumValue => "E003",
            ErrorKind::UnsupportedVersion => "E004",
            ErrorKind::Arity => "E005",
        }
    }
}

/// Error during descriptor decoding.
///
/// `path` fields locate the offending node, e.g. `recordsets[1].properties.bbox`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Structural ===
    #[error("[E001] invalid JSON: {0}")]
    InvalidJson(String),

    #[error("[E001] {path}: expected {expected}, found {found}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("[E001] {path}: value {value} out of range ({reason})")]
    ValueOutOfRange {
        path: String,
        value: f64,
        reason: &'static str,
    },

    #[error("[E001] {field} size {len} exceeds maximum {max}")]
    LimitExceeded {
        field: &'static str,
        len: usize,
        max: usize,
    },

    // === E002: Missing required field ===
    #[error("[E002] {path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    // === E003: Unknown enum value ===
    #[error("[E003] {path}: unknown value {value:?}, expected one of: {}", .allowed.join(", "))]
    UnknownEnumValue {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },

    // === E004: Unsupported version ===
    #[error("[E004] unsupported project version: {version:?}")]
    UnsupportedVersion { version: String },

    // === E005: Arity ===
    #[error("[E005] {path}: expected {expected} numbers, found {actual}")]
    ArityMismatch {
        path: String,
        expected: &'static str,
        actual: usize,
    },
}

impl DecodeError {
    /// Returns the error class for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MissingField { .. } => ErrorKind::MissingRequiredField,
            DecodeError::UnknownEnumValue { .. } => ErrorKind::UnknownEnumValue,
            DecodeError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            DecodeError::ArityMismatch { .. } => ErrorKind::Arity,
            _ => ErrorKind::Structural,
        }
    }

    /// Returns the JSON path of the offending node, when the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::UnexpectedType { path, .. }
            | DecodeError::ValueOutOfRange { path, .. }
            | DecodeError::MissingField { path, .. }
            | DecodeError::UnknownEnumValue { path, .. }
            | DecodeError::ArityMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err.to_string())
    }
}

/// Error during descriptor encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("JSON serialization failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err.to_string())
    }
}

/// A tree that cannot be represented in its schema version.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{path}: field `{field}` is not part of schema version {version}")]
    FieldNotInVersion {
        path: String,
        field: &'static str,
        version: SchemaVersion,
    },

    #[error("{path}: datatype {datatype} is not part of schema version {version}")]
    DataTypeNotInVersion {
        path: String,
        datatype: &'static str,
        version: SchemaVersion,
    },

    #[error("cannot downgrade project from schema version {from} to {to}")]
    Downgrade {
        from: SchemaVersion,
        to: SchemaVersion,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        let err = DecodeError::MissingField {
            path: "recordsets[0]".to_string(),
            field: "datatype",
        };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.kind().code(), "E002");
        assert!(err.to_string().starts_with("[E002]"));
        assert!(err.to_string().contains("`datatype`"));
    }

    #[test]
    fn test_unknown_enum_lists_allowed() {
        let err = DecodeError::UnknownEnumValue {
            path: "recordsets[0].datatype".to_string(),
            value: "Polyhedron".to_string(),
            allowed: &["Vector", "Raster"],
        };
        assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
        assert_eq!(
            err.to_string(),
            "[E003] recordsets[0].datatype: unknown value \"Polyhedron\", expected one of: Vector, Raster"
        );
        assert_eq!(err.path(), Some("recordsets[0].datatype"));
    }

    #[test]
    fn test_json_errors_are_structural() {
        let err: DecodeError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.path(), None);
    }
}
