pub mod index;
pub mod repl;
pub mod search;
pub mod stats;
