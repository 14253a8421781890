//! Token filters transform or drop tokens from a stream.

pub mod lowercase;
pub mod stop;

use std::fmt::Debug;

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;

/// A stage in an analysis chain.
pub trait Filter: Send + Sync + Debug {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}
