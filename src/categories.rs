//! Category table: definitions, validation and the builtin default.

mod builtin;
mod table;


pub(crate) use builtin::{BUILTIN_FALLBACK, COMMON_WORDS, builtin_definitions};
pub use table::{CategoryDefinition, CategoryTable};
