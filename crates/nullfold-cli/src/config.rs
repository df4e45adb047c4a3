use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use nullfold_rewrite::{DeclaredTypeFacts, TypeClass};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "nullfold.json";

/// Files analyzed when neither the configuration nor the command line
/// says otherwise.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.csx"];

/// Accepts `true` as well as `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Type class given to expressions without a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultType {
    Reference,
    Value,
    Nullable,
    /// Leave undeclared expressions unclassified, which makes their guards
    /// ineligible.
    Unknown,
}

impl DefaultType {
    pub fn type_class(self) -> Option<TypeClass> {
        match self {
            DefaultType::Reference => Some(TypeClass::ReferenceType),
            DefaultType::Value => Some(TypeClass::NonNullableValueType),
            DefaultType::Nullable => Some(TypeClass::NullableValueType),
            DefaultType::Unknown => None,
        }
    }
}

/// Contents of `nullfold.json`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NullfoldConfig {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Declared type classes keyed by expression text.
    #[serde(default)]
    pub types: FxHashMap<String, TypeClass>,
    #[serde(default)]
    pub default_type: Option<DefaultType>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub skip_generated: Option<bool>,
}

/// Configuration and command line merged into what the driver needs.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Directory that include/exclude patterns are relative to.
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub facts: DeclaredTypeFacts,
    pub skip_generated: bool,
    pub fix: bool,
    pub list_files: bool,
    /// Explicit files or directories; empty means "walk `root`".
    pub files: Vec<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<NullfoldConfig> {
    let config = serde_json::from_str(source).context("failed to parse nullfold.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<NullfoldConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// The configuration file to use: the `--project` path (a file, or a
/// directory holding `nullfold.json`), else `nullfold.json` in `cwd` if
/// present.
pub fn find_config(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };

    let project = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };
    let path = if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project
    };
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Ok(Some(path))
}

pub fn resolve_options(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config_path = find_config(cwd, args.project.as_deref())?;
    let (config, root) = match &config_path {
        Some(path) => {
            let root = path
                .parent()
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (load_config(path)?, root)
        }
        None => (NullfoldConfig::default(), cwd.to_path_buf()),
    };

    let default_type = args
        .default_type
        .or(config.default_type)
        .unwrap_or(DefaultType::Reference);
    let mut facts = DeclaredTypeFacts::new(default_type.type_class());
    for (expression, class) in &config.types {
        facts.declare(expression, *class);
    }
    // Command line declarations win over the config file
    for (expression, class) in &args.types {
        facts.declare(expression, *class);
    }

    let include = config
        .include
        .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(|s| (*s).to_string()).collect());
    let skip_generated = !args.include_generated && config.skip_generated.unwrap_or(true);

    Ok(ResolvedOptions {
        root,
        include,
        exclude: config.exclude.unwrap_or_default(),
        facts,
        skip_generated,
        fix: args.fix,
        list_files: args.list_files,
        files: args.files.iter().map(|file| cwd.join(file)).collect(),
    })
}
