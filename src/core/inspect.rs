//! Purpose: Diagnostics for the inspect variant (raw bytes, first-element type).
//! Exports: `JsonType`, `json_type`, `first_element`, `bytes_literal`.
//! Role: Pure helpers; no I/O.
//! Invariants: `first_element` only succeeds for a non-empty top-level array.
use std::fmt::{self, Write as _};

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn json_type(value: &Value) -> JsonType {
    match value {
        Value::Object(_) => JsonType::Object,
        Value::Array(_) => JsonType::Array,
        Value::String(_) => JsonType::String,
        Value::Number(_) => JsonType::Number,
        Value::Bool(_) => JsonType::Boolean,
        Value::Null => JsonType::Null,
    }
}

pub fn first_element(value: &Value) -> Result<&Value, Error> {
    match value {
        Value::Array(items) => items.first().ok_or_else(|| {
            Error::new(ErrorKind::Shape)
                .with_message("top-level array is empty")
                .with_hint("The inspect view needs at least one element to report its type.")
        }),
        other => Err(Error::new(ErrorKind::Shape)
            .with_message(format!(
                "expected a top-level array, found {}",
                json_type(other)
            ))
            .with_hint("Drop --inspect to print documents whose top level is not an array.")),
    }
}

/// Escaped byte-string literal, e.g. `b"[{\"id\": 1}]\n"`. Every byte outside
/// printable ASCII is written as `\xNN`, so multi-byte UTF-8 shows as bytes.
pub fn bytes_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b' '..=b'~' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push('"');
    out
}
