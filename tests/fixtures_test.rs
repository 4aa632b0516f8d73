//! Golden-file tests driven by paired fixtures under `tests/fixtures/`.
//!
//! `format/<name>.html` + `format/<name>.expected.html` check that
//! [`htmlcheck::format`] produces the expected output. `diagnostics/<name>.html`
//! + `diagnostics/<name>.expected` check the list of diagnostic kinds (one per
//! line, in emission order) produced while building the tree.

use htmlcheck::{Ast, Language};
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};

fn format_trials() -> Vec<Trial> {
    let mut trials = Vec::new();
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/format");
    for entry in glob::glob(dir.join("*.html").to_str().unwrap()).unwrap() {
        let input_path = entry.unwrap();
        let name = input_path.file_stem().unwrap().to_string_lossy().into_owned();
        let expected_path = input_path.with_extension("").with_extension("expected.html");
        let name_for_test = format!("format::{name}");
        trials.push(Trial::test(name_for_test, move || run_format_fixture(&input_path, &expected_path)));
    }
    trials
}

fn run_format_fixture(input_path: &Path, expected_path: &PathBuf) -> Result<(), Failed> {
    let source = fs::read(input_path).map_err(|e| Failed::from(e.to_string()))?;
    let expected = fs::read_to_string(expected_path).map_err(|e| Failed::from(e.to_string()))?;
    let ast = Ast::parse(&source, Language::Html);
    let actual = htmlcheck::format(&ast).map_err(|e| Failed::from(format!("expected formattable input: {e}")))?;
    if actual != expected {
        return Err(Failed::from(format!(
            "mismatch for {}:\n--- expected ---\n{}\n--- actual ---\n{}",
            input_path.display(),
            expected,
            actual
        )));
    }
    Ok(())
}

fn diagnostics_trials() -> Vec<Trial> {
    let mut trials = Vec::new();
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/diagnostics");
    for entry in glob::glob(dir.join("*.html").to_str().unwrap()).unwrap() {
        let input_path = entry.unwrap();
        let name = input_path.file_stem().unwrap().to_string_lossy().into_owned();
        let expected_path = input_path.with_extension("expected");
        let name_for_test = format!("diagnostics::{name}");
        trials.push(Trial::test(name_for_test, move || run_diagnostics_fixture(&input_path, &expected_path)));
    }
    trials
}

fn run_diagnostics_fixture(input_path: &Path, expected_path: &PathBuf) -> Result<(), Failed> {
    let source = fs::read(input_path).map_err(|e| Failed::from(e.to_string()))?;
    let expected = fs::read_to_string(expected_path).map_err(|e| Failed::from(e.to_string()))?;
    let ast = Ast::parse(&source, Language::Html);
    let mut actual = String::new();
    for diag in &ast.diagnostics {
        actual.push_str(diag.kind.as_str());
        actual.push('\n');
    }
    if actual != expected {
        return Err(Failed::from(format!(
            "mismatch for {}:\nexpected:\n{}\nactual:\n{}",
            input_path.display(),
            expected,
            actual
        )));
    }
    Ok(())
}

fn main() {
    let args = Arguments::from_args();
    let mut tests = format_trials();
    tests.extend(diagnostics_trials());
    libtest_mimic::run(&args, tests).exit();
}
