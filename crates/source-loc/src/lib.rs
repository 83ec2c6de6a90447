//! Source position tracking for the template tree builder.
//!
//! Tokens, tree nodes and parse errors all carry 1-based line/column
//! positions so that diagnostics can point back into the template source.

mod location;

pub use location::{Position, SourceLocation};
