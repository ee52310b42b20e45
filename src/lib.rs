//! Purpose: Library crate backing the `jsonfetch` binaries and tests.
//! Exports: `api` (pipeline, fetch, render, errors).
//! Role: Fetch one JSON document over HTTP and render it for humans.
//! Invariants: Modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
