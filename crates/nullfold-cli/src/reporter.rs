use colored::Colorize;
use nullfold_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use std::path::Path;

struct SourceText {
    text: String,
    line_map: LineMap,
}

pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, SourceText>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
        }
    }

    /// Register the text a file's diagnostics were computed on. Files
    /// that are not registered are read from disk when first needed.
    pub fn add_source(&mut self, file: &str, text: &str) {
        self.sources.insert(
            file.to_string(),
            SourceText {
                text: text.to_string(),
                line_map: LineMap::build(text),
            },
        );
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.position_for(&diagnostic.file, diagnostic.start) {
            Some((line, column)) => format!("{}:{line}:{column}", diagnostic.file),
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// The first source line of the span, underlined with `~`:
    ///
    /// ```text
    ///     2   if (a != null) a.m();
    ///         ~~~~~~~~~~~~~~~~~~~~~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let color = self.color;
        let source = self.source(file)?;
        let position = source.line_map.offset_to_position(start, &source.text);
        let line_start = source.line_map.line_start(position.line as usize)? as usize;
        let line_text = source.text.get(line_start..)?.lines().next().unwrap_or("");

        let span_start = (start as usize).saturating_sub(line_start);
        let span_end = span_start + length as usize;
        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            if offset >= span_end {
                break;
            }
            if offset < span_start {
                // Keep tabs so the underline lines up with the source line
                underline.push(if ch == '\t' { '\t' } else { ' ' });
            } else {
                underline.push('~');
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if color {
            underline.blue().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {:>3}   {line_text}\n        {underline}",
            position.line + 1
        ))
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let source = self.source(file)?;
        let position = source.line_map.offset_to_position(offset, &source.text);
        Some((position.line + 1, position.character + 1))
    }

    fn source(&mut self, file: &str) -> Option<&SourceText> {
        if file.is_empty() {
            return None;
        }
        if !self.sources.contains_key(file) {
            let text = std::fs::read_to_string(Path::new(file)).ok()?;
            self.add_source(file, &text);
        }
        self.sources.get(file)
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("NF{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
