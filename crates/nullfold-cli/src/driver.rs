//! File discovery, parallel analysis and `--fix` write-back.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use nullfold_common::Diagnostic;
use nullfold_common::diagnostics::diagnostic_codes;
use nullfold_lsp::{NullCheckAnalyzer, NullCheckCodeFix};
use nullfold_rewrite::CancellationToken;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::ResolvedOptions;

/// Exit status: nothing to report.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status: suggestions were reported and left unapplied.
pub const EXIT_SUGGESTIONS: i32 = 1;
/// Exit status: parse errors, or the run itself failed.
pub const EXIT_ERRORS: i32 = 2;

/// Outcome for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// The text the diagnostics refer to (before any fix).
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of guards rewritten on disk.
    pub fixed: usize,
}

impl FileReport {
    pub fn suggestions(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.code == diagnostic_codes::USE_NULL_CONDITIONAL)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub files: Vec<FileReport>,
}

impl RunResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    pub fn suggestion_count(&self) -> usize {
        self.files.iter().map(FileReport::suggestions).sum()
    }

    pub fn fixed_count(&self) -> usize {
        self.files.iter().map(|file| file.fixed).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::has_errors)
    }

    /// Fixed suggestions do not count as outstanding.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            EXIT_ERRORS
        } else if self.suggestion_count() > self.fixed_count() {
            EXIT_SUGGESTIONS
        } else {
            EXIT_SUCCESS
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build glob set")
}

/// Path of `path` relative to `base` with `/` separators, for glob matching.
fn relative_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Files to analyze, sorted and without duplicates.
///
/// Explicit files are taken as given. Directories, and the project root
/// when nothing was given, are walked and filtered through the include
/// and exclude patterns.
pub fn discover_files(options: &ResolvedOptions) -> Result<Vec<PathBuf>> {
    let include = build_glob_set(&options.include)?;
    let exclude = build_glob_set(&options.exclude)?;

    let roots: Vec<&Path> = if options.files.is_empty() {
        vec![options.root.as_path()]
    } else {
        options.files.iter().map(PathBuf::as_path).collect()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = relative_path(root, entry.path());
            if include.is_match(&relative) && !exclude.is_match(&relative) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn analyze_file(path: &Path, options: &ResolvedOptions) -> Result<FileReport> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path.display().to_string();
    let cancel = CancellationToken::new();

    let diagnostics = NullCheckAnalyzer::new(&options.facts)
        .include_generated(!options.skip_generated)
        .analyze(&file_name, &source, &cancel);

    let mut report = FileReport {
        path: path.to_path_buf(),
        source,
        diagnostics,
        fixed: 0,
    };
    if options.fix && report.suggestions() > 0 {
        let result = NullCheckCodeFix::new(&options.facts).apply_all(&file_name, &report.source, &cancel);
        if result.applied > 0 {
            std::fs::write(path, &result.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            report.fixed = result.applied;
        }
    }
    debug!(
        file = %file_name,
        diagnostics = report.diagnostics.len(),
        fixed = report.fixed,
        "file done"
    );
    Ok(report)
}

/// Analyze (and with `--fix`, rewrite) every discovered file in parallel.
pub fn run(options: &ResolvedOptions) -> Result<RunResult> {
    let files = discover_files(options)?;
    info!(files = files.len(), fix = options.fix, "analyzing");
    let files = files
        .par_iter()
        .map(|path| analyze_file(path, options))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunResult { files })
}
