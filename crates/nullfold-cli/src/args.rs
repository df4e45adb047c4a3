use clap::Parser;
use nullfold_rewrite::TypeClass;
use std::path::PathBuf;

use crate::config::DefaultType;

/// CLI arguments for the nullfold binary.
#[derive(Parser, Debug)]
#[command(
    name = "nullfold",
    version,
    about = "Rewrites C# null-check guards into null-conditional accesses"
)]
pub struct CliArgs {
    /// Path to nullfold.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Rewrite eligible guards in place.
    #[arg(long)]
    pub fix: bool,

    /// Color and format diagnostics. Defaults to on when stderr is a terminal.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    /// Type class of expressions that have no declared type.
    #[arg(long = "default-type", value_enum, ignore_case = true)]
    pub default_type: Option<DefaultType>,

    /// Declare the type class of an expression, e.g. `--type d.myStruct=nullable`.
    #[arg(long = "type", value_name = "EXPR=CLASS", value_parser = parse_type_declaration)]
    pub types: Vec<(String, TypeClass)>,

    /// Also analyze files that look generated.
    #[arg(long = "include-generated")]
    pub include_generated: bool,

    /// Print the files that would be analyzed and stop.
    #[arg(long = "list-files")]
    pub list_files: bool,

    /// Files or directories to analyze. Defaults to the project directory.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

fn parse_type_declaration(value: &str) -> Result<(String, TypeClass), String> {
    let Some((expression, class)) = value.rsplit_once('=') else {
        return Err(format!("expected EXPR=CLASS, found '{value}'"));
    };
    let expression = expression.trim();
    if expression.is_empty() {
        return Err("missing expression before '='".to_string());
    }
    let class = class.trim().to_ascii_lowercase().parse::<TypeClass>()?;
    Ok((expression.to_string(), class))
}
