use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNEXPECTED_CHARACTER: u32 = 1001;
    pub const TOKEN_EXPECTED: u32 = 1002;
    pub const EXPRESSION_EXPECTED: u32 = 1003;
    pub const STATEMENT_EXPECTED: u32 = 1004;
    pub const IDENTIFIER_EXPECTED: u32 = 1005;
    pub const UNTERMINATED_LITERAL: u32 = 1006;

    pub const USE_NULL_CONDITIONAL: u32 = 6001;
    pub const USE_NULL_CONDITIONAL_FADED_TOKEN: u32 = 6002;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_CHARACTER,
        category: DiagnosticCategory::Error,
        message: "Unexpected character '{0}'.",
    };
    pub const TOKEN_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Expression expected.",
    };
    pub const STATEMENT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    };
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    };
    pub const UNTERMINATED_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated literal.",
    };
    pub const USE_NULL_CONDITIONAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::USE_NULL_CONDITIONAL,
        category: DiagnosticCategory::Suggestion,
        message: "Null check on '{0}' can be replaced with a null-conditional access.",
    };
    pub const USE_NULL_CONDITIONAL_FADED_TOKEN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::USE_NULL_CONDITIONAL_FADED_TOKEN,
        category: DiagnosticCategory::Suggestion,
        message: "Unnecessary null check.",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    /// The span is code made redundant by a suggestion (rendered faded).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reports_unnecessary: bool,
}

impl Diagnostic {
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            code: message.code,
            file: file.into(),
            start,
            length,
            message_text: format_message(message.message, args),
            reports_unnecessary: false,
        }
    }

    pub fn unnecessary(mut self) -> Self {
        self.reports_unnecessary = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_substitutes_positional_args() {
        assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
    }

    #[test]
    fn unnecessary_marks_the_diagnostic() {
        let diag = Diagnostic::from_message(
            "a.csx",
            0,
            3,
            &diagnostic_messages::USE_NULL_CONDITIONAL_FADED_TOKEN,
            &[],
        )
        .unnecessary();
        assert!(diag.reports_unnecessary);
        assert_eq!(diag.category, DiagnosticCategory::Suggestion);
        assert!(!diag.is_error());
    }
}
