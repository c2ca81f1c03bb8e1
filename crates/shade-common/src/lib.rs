//! Shared types for the shade compiler.
//!
//! Spans are carried from the ESTree input through the annotated tree so that
//! every inference error can point back at the shader source.

pub mod span;

pub use span::{LineIndex, Span};
