//! Purpose: Pipeline building blocks (fetch, decode, render, inspect) plus errors.
//! Role: Internal modules; the public surface is re-exported from `api`.
pub mod decode;
pub mod error;
pub mod fetch;
pub mod inspect;
pub mod render;
