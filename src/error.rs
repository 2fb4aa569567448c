//! Error types for decoding and schema handling.

use crate::kind::Kind;

/// Failure of a single decode call. Decoding stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("field {field}: unhandled type {kind}")]
    UnhandledType { field: String, kind: Kind },
    #[error("field {field}: insufficient data (need {needed} bytes, {remaining} remaining)")]
    InsufficientData {
        field: String,
        needed: usize,
        remaining: usize,
    },
    #[error("field {field}: length variable not defined: {variable}")]
    LengthVariableNotDefined { field: String, variable: String },
    #[error("field {field}: missing string length specification (length variable, count or null termination)")]
    MissingStringLengthSpec { field: String },
    /// `partial` holds the bytes read before input ran out.
    #[error("field {field}: reached end of input before null termination")]
    UnterminatedString { field: String, partial: Vec<u8> },
}

impl DecodeError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            DecodeError::UnhandledType { field, .. }
            | DecodeError::InsufficientData { field, .. }
            | DecodeError::LengthVariableNotDefined { field, .. }
            | DecodeError::MissingStringLengthSpec { field }
            | DecodeError::UnterminatedString { field, .. } => field,
        }
    }

    /// Bytes accumulated before the failure, for unterminated strings only.
    pub fn partial(&self) -> Option<&[u8]> {
        match self {
            DecodeError::UnterminatedString { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Errors from parsing schema text or validating a field list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("field {field}: unknown kind {kind}")]
    UnknownKind { field: String, kind: String },
    #[error("field {field}: kind is unspecified")]
    UnspecifiedKind { field: String },
    #[error("field with empty name")]
    EmptyName,
    #[error("duplicate field name: {0}")]
    DuplicateName(String),
    #[error("field {field}: length variable {variable} is not an earlier integer field")]
    UndefinedLengthVariable { field: String, variable: String },
    #[error("field {field}: length variable {variable} on a non-string field")]
    LengthVariableOnNonString { field: String, variable: String },
    #[error("field {field}: string has no length variable, count or null termination")]
    MissingStringLength { field: String },
    #[error("field {field}: invalid count {count}")]
    InvalidCount { field: String, count: String },
}
