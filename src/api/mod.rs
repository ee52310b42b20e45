//! Purpose: Define the public Rust API boundary for jsonfetch.
//! Exports: Pipeline entry points plus the fetch, render and error types they use.
//! Role: Public surface for the CLI binaries and tests; hides internal modules.
//! Invariants: This module is the only public path to pipeline primitives.

mod pipeline;

pub use crate::core::decode::{decode_text, parse_json};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::fetch::{DEFAULT_URL, FetchConfig, HttpFetcher, RawResponse, parse_url};
pub use crate::core::inspect::{JsonType, bytes_literal, first_element, json_type};
pub use crate::core::render::{DEFAULT_INDENT, RenderOptions, render};
pub use pipeline::{PipelineOptions, PipelineOutput, Variant, format_response, run_pipeline};
