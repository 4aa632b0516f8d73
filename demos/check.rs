//! Parse a file and report diagnostics, one line per finding (spec.md §6:
//! `check PATH`).
//!
//! ```text
//! cargo run --example=check -- index.html
//! ```
use std::fs;
use std::process::ExitCode;

use argh::FromArgs;
use htmlcheck::{Ast, Language};

/// Parse and report diagnostics, non-zero exit on any error.
#[derive(FromArgs)]
struct Cli {
    /// path to the HTML file to check
    #[argh(positional)]
    path: String,
}

fn row_col(source: &[u8], offset: u32) -> (u32, u32) {
    let mut row = 1u32;
    let mut col = 1u32;
    for &b in &source[..offset as usize] {
        if b == b'\n' {
            row += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (row, col)
}

fn main() -> ExitCode {
    let cli: Cli = argh::from_env();
    let source = match fs::read(&cli.path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{}: {err}", cli.path);
            return ExitCode::from(2);
        }
    };

    let ast = Ast::parse(&source, Language::Html);
    let mut found = false;

    for (kind, span) in &ast.syntax_errors {
        found = true;
        report(&cli.path, &source, span.start, &kind.to_string());
    }
    for diag in &ast.diagnostics {
        found = true;
        report(&cli.path, &source, diag.main_location.start, &diag.kind.to_string());
    }

    if found {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn report(path: &str, source: &[u8], offset: u32, message: &str) {
    let (row, col) = row_col(source, offset);
    println!("{path}:{row}:{col}: {message}");
    let line_start = source[..offset as usize].iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let line_end = source[offset as usize..].iter().position(|&b| b == b'\n').map_or(source.len(), |i| offset as usize + i);
    let line = String::from_utf8_lossy(&source[line_start..line_end]);
    println!("{line}");
    println!("{}^", " ".repeat(offset as usize - line_start));
}
