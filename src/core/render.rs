//! Purpose: Render pretty JSON for CLI output with optional key sorting and ANSI color.
//! Exports: `RenderOptions`, `render`.
//! Role: Small, pure formatter used by the pipeline emission path.
//! Invariants: Output is a pure function of (value, options); repeated renders are identical.
//! Invariants: With indent 2, no sorting, no ASCII escaping and no color, output equals
//! `serde_json::to_string_pretty`.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use std::fmt::Write as _;

use serde_json::{Map, Value};

pub const DEFAULT_INDENT: usize = 4;

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    /// Spaces per nesting level. Zero still breaks lines.
    pub indent: usize,
    pub sort_keys: bool,
    /// Escape every non-ASCII character as `\uXXXX`.
    pub ensure_ascii: bool,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            sort_keys: false,
            ensure_ascii: true,
            color: false,
        }
    }
}

pub fn render(value: &Value, options: &RenderOptions) -> String {
    let mut out = String::new();
    Renderer { options, out: &mut out }.write_value(value, 0);
    out
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    out: &'a mut String,
}

impl Renderer<'_> {
    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.push_colored("null", COLOR_NULL),
            Value::Bool(val) => {
                let text = if *val { "true" } else { "false" };
                self.push_colored(text, COLOR_BOOL);
            }
            Value::Number(num) => self.push_colored(&num.to_string(), COLOR_NUMBER),
            Value::String(text) => {
                let encoded = encode_string(text, self.options.ensure_ascii);
                self.push_colored(&encoded, COLOR_STRING);
            }
            Value::Array(items) => self.write_array(items, depth),
            Value::Object(map) => self.write_object(map, depth),
        }
    }

    fn write_array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.push_colored("[]", COLOR_PUNCT);
            return;
        }
        self.push_colored("[", COLOR_PUNCT);
        self.out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            self.push_indent(depth + 1);
            self.write_value(item, depth + 1);
            if idx + 1 < items.len() {
                self.push_colored(",", COLOR_PUNCT);
            }
            self.out.push('\n');
        }
        self.push_indent(depth);
        self.push_colored("]", COLOR_PUNCT);
    }

    fn write_object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.push_colored("{}", COLOR_PUNCT);
            return;
        }
        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        }

        self.push_colored("{", COLOR_PUNCT);
        self.out.push('\n');
        let len = entries.len();
        for (idx, (key, value)) in entries.into_iter().enumerate() {
            self.push_indent(depth + 1);
            let encoded = encode_string(key, self.options.ensure_ascii);
            self.push_colored(&encoded, COLOR_KEY);
            self.push_colored(":", COLOR_PUNCT);
            self.out.push(' ');
            self.write_value(value, depth + 1);
            if idx + 1 < len {
                self.push_colored(",", COLOR_PUNCT);
            }
            self.out.push('\n');
        }
        self.push_indent(depth);
        self.push_colored("}", COLOR_PUNCT);
    }

    fn push_indent(&mut self, depth: usize) {
        let width = depth * self.options.indent;
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    fn push_colored(&mut self, text: &str, color: &str) {
        if !self.options.color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

fn encode_string(text: &str, ensure_ascii: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => push_unicode_escape(ch, &mut out),
            ch if ensure_ascii && !(' '..='~').contains(&ch) => push_unicode_escape(ch, &mut out),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn push_unicode_escape(ch: char, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        let _ = write!(out, "\\u{unit:04x}");
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderOptions, render};
    use serde_json::{Value, json};

    fn plain(indent: usize, sort_keys: bool) -> RenderOptions {
        RenderOptions {
            indent,
            sort_keys,
            ensure_ascii: false,
            color: false,
        }
    }

    #[test]
    fn render_matches_pretty_when_plain() {
        let value = json!({
            "arr": [1, true, null, "ü"],
            "nested": { "x": "y\n", "empty": {}, "none": [] }
        });
        let rendered = render(&value, &plain(2, false));
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(rendered, pretty);
    }

    #[test]
    fn default_options_use_four_spaces_and_ascii() {
        let value = json!({"city": "Zürich", "tags": ["a"]});
        let rendered = render(&value, &RenderOptions::default());
        assert_eq!(
            rendered,
            "{\n    \"city\": \"Z\\u00fcrich\",\n    \"tags\": [\n        \"a\"\n    ]\n}"
        );
    }

    #[test]
    fn sorted_keys_put_a_before_b() {
        let value: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).expect("value");
        let options = RenderOptions {
            sort_keys: true,
            ..RenderOptions::default()
        };
        let rendered = render(&value, &options);
        let a = rendered.find("\"a\"").expect("a");
        let b = rendered.find("\"b\"").expect("b");
        assert!(a < b);
        assert_eq!(rendered, "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn unsorted_keeps_document_order() {
        let value: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).expect("value");
        let rendered = render(&value, &RenderOptions::default());
        assert_eq!(rendered, "{\n    \"b\": 2,\n    \"a\": 1\n}");
    }

    #[test]
    fn sorting_applies_at_every_depth() {
        let value: Value =
            serde_json::from_str(r#"[{"z": {"y": 1, "x": 2}, "m": null}]"#).expect("value");
        let options = RenderOptions {
            indent: 1,
            sort_keys: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            render(&value, &options),
            "[\n {\n  \"m\": null,\n  \"z\": {\n   \"x\": 2,\n   \"y\": 1\n  }\n }\n]"
        );
    }

    #[test]
    fn zero_indent_still_breaks_lines() {
        let value = json!([1, [2]]);
        assert_eq!(render(&value, &plain(0, false)), "[\n1,\n[\n2\n]\n]");
    }

    #[test]
    fn ensure_ascii_uses_surrogate_pairs() {
        let value = json!("a😀\u{7f}\u{1}");
        let rendered = render(&value, &RenderOptions::default());
        assert_eq!(rendered, "\"a\\ud83d\\ude00\\u007f\\u0001\"");
    }

    #[test]
    fn render_round_trips() {
        let value = json!({
            "name": "Flatiron \"School\"",
            "coords": {"lat": 40.7, "lng": -74.01},
            "open": true,
            "tags": [],
            "note": null
        });
        for sort_keys in [false, true] {
            let options = RenderOptions {
                sort_keys,
                ..RenderOptions::default()
            };
            let back: Value = serde_json::from_str(&render(&value, &options)).expect("parse");
            assert_eq!(back, value);
        }
    }

    #[test]
    fn numbers_keep_source_digits() {
        let value: Value =
            serde_json::from_str(r#"{"id": 123456789012345678901234567890, "x": 1.10}"#)
                .expect("value");
        assert_eq!(
            render(&value, &RenderOptions::default()),
            "{\n    \"id\": 123456789012345678901234567890,\n    \"x\": 1.10\n}"
        );
    }

    #[test]
    fn deep_arrays_render() {
        let depth = 200;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let mut de = serde_json::Deserializer::from_str(&text);
        de.disable_recursion_limit();
        let value: Value = serde::Deserialize::deserialize(&mut de).expect("value");
        let rendered = render(&value, &plain(0, false));
        assert_eq!(rendered.matches('[').count(), depth);
        assert!(rendered.starts_with("[\n[\n"));
        assert!(rendered.contains("[]\n]"));
        assert!(rendered.ends_with("]\n]"));
    }

    #[test]
    fn render_emits_ansi_when_enabled() {
        let value = json!({"k":"v","n":1,"b":true,"z":null});
        let options = RenderOptions {
            color: true,
            ..RenderOptions::default()
        };
        let colored = render(&value, &options);
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m1\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[39mnull\u{1b}[0m"));
        assert!(!render(&value, &RenderOptions::default()).contains('\u{1b}'));
    }
}
