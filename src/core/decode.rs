//! Purpose: Turn a raw response body into a parsed JSON value.
//! Exports: `decode_text`, `parse_json`.
//! Role: Text decode + whole-document parse, mapped onto crate errors.
//! Invariants: Body text is strict UTF-8; a leading BOM is dropped before parsing.
//! Invariants: A failed parse never yields a partial value.
use bstr::ByteSlice;
use serde_json::Value;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::inspect::json_type;
use crate::json::parse;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn decode_text(body: &[u8]) -> Result<&str, Error> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    body.to_str().map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("response body is not valid UTF-8")
            .with_hint(format!(
                "first invalid byte at offset {}; the endpoint may not be serving JSON text",
                err.valid_up_to()
            ))
            .with_source(err)
    })
}

pub fn parse_json(text: &str) -> Result<Value, Error> {
    let value: Value = parse::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("response body is not valid JSON")
            .with_hint(parse::hint_for_error(&err, "response body"))
            .with_source(err)
    })?;
    debug!(top_level = %json_type(&value), "parsed response body");
    Ok(value)
}
