//! Purpose: Provide the internal JSON decode entrypoints and failure categories.
//! Exports: `from_str`, `nesting_depth`, `MAX_DEPTH`, `ParseFailureCategory`,
//! `categorize_error`, `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Whole-document decode only; trailing input is an error.
//! Invariants: Nesting is capped at `MAX_DEPTH` before the unbounded parser runs.
//! Notes: Error mapping to crate errors is done by callsites so context stays explicit.

use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    DepthLimit,
    Data,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub(crate) const MAX_DEPTH: usize = 1000;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    let depth = nesting_depth(input);
    if depth > MAX_DEPTH {
        return Err(<serde_json::Error as serde::de::Error>::custom(format!(
            "recursion limit exceeded: nesting depth {depth} is above {MAX_DEPTH}"
        )));
    }
    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let value = serde::Deserialize::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// Deepest bracket nesting outside of string literals. Unbalanced input is
/// left for the parser to reject.
pub(crate) fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in input.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    let by_message = categorize_message(&err.to_string());
    if by_message != ParseFailureCategory::Unknown {
        return by_message;
    }
    match err.classify() {
        serde_json::error::Category::Syntax => ParseFailureCategory::Syntax,
        serde_json::error::Category::Eof => ParseFailureCategory::Truncated,
        serde_json::error::Category::Data => ParseFailureCategory::Data,
        serde_json::error::Category::Io => ParseFailureCategory::Unknown,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("eof while parsing") {
        ParseFailureCategory::Truncated
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; line {}, column {}; context: {context}",
        categorize_error(err).as_str(),
        err.line(),
        err.column()
    )
}
