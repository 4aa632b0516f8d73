//! Parse stdin and render every diagnostic as a source-annotated snippet,
//! the way an editor's hover/gutter markers would.
//!
//! ```text
//! printf '<div><span></div>' | cargo run --example=annotate
//! ```
use std::io::{self, Read};

use annotate_snippets::{Level, Renderer, Snippet};
use htmlcheck::{Ast, Language};

fn main() {
    let mut source = Vec::new();
    io::stdin().lock().read_to_end(&mut source).expect("read stdin");
    let text = String::from_utf8_lossy(&source);

    let ast = Ast::parse(&source, Language::Html);
    let renderer = Renderer::styled();

    for (kind, span) in &ast.syntax_errors {
        let message = Level::Error.title(kind.as_str()).snippet(
            Snippet::source(&text)
                .origin("<stdin>")
                .fold(true)
                .annotation(Level::Error.span(span.start as usize..span.end as usize).label(kind.as_str())),
        );
        println!("{}", renderer.render(message));
    }

    for diag in &ast.diagnostics {
        let label = diag.reason.unwrap_or(diag.kind.as_str());
        let mut message = Level::Warning.title(diag.kind.as_str()).snippet(
            Snippet::source(&text).origin("<stdin>").fold(true).annotation(
                Level::Warning
                    .span(diag.main_location.start as usize..diag.main_location.end as usize)
                    .label(label),
            ),
        );
        if let Some(secondary) = diag.secondary {
            message = message.snippet(
                Snippet::source(&text)
                    .origin("<stdin>")
                    .fold(true)
                    .annotation(Level::Info.span(secondary.start as usize..secondary.end as usize).label("first occurrence here")),
            );
        }
        println!("{}", renderer.render(message));
    }
}
