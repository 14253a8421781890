//! Stored documents.

pub mod document;

pub use document::DocumentStore;
