//! Purpose: Run the fetch → decode → parse → render sequence once.
//! Exports: `Variant`, `PipelineOptions`, `PipelineOutput`, `run_pipeline`, `format_response`.
//! Role: Library entry point shared by the CLI binaries and tests.
//! Invariants: Output lines are only produced after every step succeeded, so a failed
//! run never yields partial output.
//! Invariants: Rendering is deterministic for a given response and options.
use std::io::{self, Write};

use serde_json::Value;

use crate::core::decode::{decode_text, parse_json};
use crate::core::error::Error;
use crate::core::fetch::{DEFAULT_URL, FetchConfig, HttpFetcher, RawResponse, parse_url};
use crate::core::inspect::{bytes_literal, first_element, json_type};
use crate::core::render::{RenderOptions, render};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    /// Pretty print with sorted keys.
    Dump,
    /// Raw bytes, document-order pretty print, then the first element's type.
    Inspect,
}

impl Variant {
    pub fn default_sort_keys(self) -> bool {
        match self {
            Variant::Dump => true,
            Variant::Inspect => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub url: String,
    pub variant: Variant,
    pub render: RenderOptions,
    pub fetch: FetchConfig,
}

impl PipelineOptions {
    pub fn new(variant: Variant) -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            variant,
            render: RenderOptions {
                sort_keys: variant.default_sort_keys(),
                ..RenderOptions::default()
            },
            fetch: FetchConfig::default(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub status: u16,
    pub value: Value,
    pub lines: Vec<String>,
}

impl PipelineOutput {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

pub fn run_pipeline(options: &PipelineOptions) -> Result<PipelineOutput, Error> {
    let url = parse_url(&options.url)?;
    let fetcher = HttpFetcher::new(options.fetch.clone());
    let raw = fetcher.get(&url)?;
    format_response(&raw, options.variant, &options.render)
        .map_err(|err| err.with_url(raw.url.clone()).with_status(raw.status))
}

pub fn format_response(
    raw: &RawResponse,
    variant: Variant,
    options: &RenderOptions,
) -> Result<PipelineOutput, Error> {
    let text = decode_text(&raw.body)?;
    let value = parse_json(text)?;

    let mut lines = Vec::new();
    match variant {
        Variant::Dump => {
            lines.push(render(&value, options));
        }
        Variant::Inspect => {
            let first = first_element(&value)?;
            lines.push(bytes_literal(&raw.body));
            lines.push(render(&value, options));
            lines.push(format!("type: {}", json_type(first)));
        }
    }

    Ok(PipelineOutput {
        status: raw.status,
        value,
        lines,
    })
}
