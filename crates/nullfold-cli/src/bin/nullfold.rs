#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use nullfold_cli::args::CliArgs;
use nullfold_cli::config::resolve_options;
use nullfold_cli::driver::{self, EXIT_ERRORS, EXIT_SUCCESS};
use nullfold_cli::reporter::Reporter;

fn main() {
    // Zero cost unless NULLFOLD_LOG or RUST_LOG is set
    nullfold_cli::tracing_config::init_tracing();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_ERRORS
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let options = resolve_options(&args, &cwd)?;

    if options.list_files {
        for file in driver::discover_files(&options)? {
            println!("{}", file.display());
        }
        return Ok(EXIT_SUCCESS);
    }

    let result = driver::run(&options)?;

    let pretty = args.pretty.unwrap_or_else(|| std::io::stderr().is_terminal());
    let mut reporter = Reporter::new(pretty);
    for file in &result.files {
        if !file.diagnostics.is_empty() {
            reporter.add_source(&file.path.display().to_string(), &file.source);
        }
    }
    // Fade-out diagnostics are for editors
    let diagnostics: Vec<_> = result
        .diagnostics()
        .filter(|d| !d.reports_unnecessary)
        .cloned()
        .collect();
    if !diagnostics.is_empty() {
        eprint!("{}", reporter.render(&diagnostics));
    }

    let files_with_suggestions = result.files.iter().filter(|f| f.suggestions() > 0).count();
    if options.fix {
        println!(
            "Fixed {} null check(s) in {} file(s).",
            result.fixed_count(),
            files_with_suggestions
        );
    } else if result.suggestion_count() > 0 {
        println!(
            "Found {} null check(s) to simplify in {} file(s).",
            result.suggestion_count(),
            files_with_suggestions
        );
    }

    Ok(result.exit_code())
}
