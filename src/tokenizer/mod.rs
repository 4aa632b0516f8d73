//! C2: the streaming, non-allocating HTML5 tokenizer (spec.md §4.1).

mod machine;
mod state;

pub use machine::Tokenizer;
pub use state::{State, TextMode};
