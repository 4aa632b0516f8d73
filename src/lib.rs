// This crate parses untrusted HTML. Every span/index arithmetic path is
// checked; no module reaches for unsafe to do it.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod ast;
pub mod attributes;
pub mod diagnostic;
pub mod elements;
pub mod error;
pub mod formatter;
pub mod ide;
pub mod langtag;
pub mod model;
mod scan;
pub mod span;
pub mod token;
pub mod tokenizer;
pub mod validator;

pub use ast::{Ast, Language, Node, NodeKind};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use elements::ElementKind;
pub use error::ParseErrorKind;
pub use formatter::{format, NotFormattable};
pub use ide::CompletionItem;
pub use span::Span;
pub use token::{AttrValue, Quote, TagKind, Token};
pub use tokenizer::Tokenizer;
