//! Format HTML documents in place, or via stdin/stdout (spec.md §6: `fmt`).
//!
//! ```text
//! cargo run --example=fmt -- --stdin < messy.html
//! cargo run --example=fmt -- index.html
//! ```
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use argh::FromArgs;
use htmlcheck::{format, Ast, Language};

/// Format HTML documents (in place or stdin/stdout via --stdin).
#[derive(FromArgs)]
struct Cli {
    /// read from stdin, write formatted output to stdout
    #[argh(switch)]
    stdin: bool,

    /// paths to the HTML files to format in place
    #[argh(positional)]
    paths: Vec<String>,
}

fn main() -> ExitCode {
    let cli: Cli = argh::from_env();

    if cli.stdin {
        let mut source = Vec::new();
        if let Err(err) = io::stdin().lock().read_to_end(&mut source) {
            eprintln!("stdin: {err}");
            return ExitCode::from(2);
        }
        return format_one("<stdin>", &source, |out| {
            io::stdout().lock().write_all(out.as_bytes())
        });
    }

    let mut exit = ExitCode::SUCCESS;
    for path in &cli.paths {
        let source = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("{path}: {err}");
                exit = ExitCode::from(2);
                continue;
            }
        };
        let code = format_one(path, &source, |out| fs::write(path, out));
        if code != ExitCode::SUCCESS {
            exit = code;
        }
    }
    exit
}

fn format_one(label: &str, source: &[u8], write: impl FnOnce(&str) -> io::Result<()>) -> ExitCode {
    let ast = Ast::parse(source, Language::Html);
    for (kind, _) in &ast.syntax_errors {
        eprintln!("{label}: {kind}");
    }
    match format(&ast) {
        Ok(out) => {
            if let Err(err) = write(&out) {
                eprintln!("{label}: {err}");
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{label}: {err}");
            ExitCode::from(1)
        }
    }
}
