//! Purpose: Internal JSON parsing boundary shared by the pipeline.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for parser details so callsites avoid ad hoc decode logic.
//! Invariants: Response bodies are decoded through this module only.

pub(crate) mod parse;
