//! Positional inverted index.
//!
//! # Module Structure
//!
//! - `term`: `(field, text)` lookup keys
//! - `posting`: postings and posting lists
//! - `field_index`: per-field dictionaries and statistics
//! - `writer`: write sessions
//! - `snapshot`: frozen, shareable index state
//! - `codec`: saving and loading snapshots

pub mod codec;
pub mod field_index;
pub mod posting;
pub mod snapshot;
pub mod term;
pub mod writer;

pub use field_index::{FieldIndex, FieldStats};
pub use posting::{Posting, PostingList};
pub use snapshot::IndexSnapshot;
pub use term::Term;
pub use writer::{IndexWriter, WriterStats};
