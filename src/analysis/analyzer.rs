//! Analyzers combine a tokenizer with a chain of filters.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod per_field;
pub mod standard;
pub mod whitespace;
