use serde::{Deserialize, Serialize};

use crate::text::TextRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single analysis finding.
///
/// `code` is a stable machine-readable identifier; `message` is what the user
/// sees. Diagnostics are advisory and never abort analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub range: Option<TextRange>,
}

impl Diagnostic {
    pub fn error(code: &'static str, message: impl Into<String>, range: Option<TextRange>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            range,
        }
    }

    pub fn warning(
        code: &'static str,
        message: impl Into<String>,
        range: Option<TextRange>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_constructor_fills_severity_and_code() {
        let diag = Diagnostic::warning("format.too-many-args", "Too many arguments", None);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code, "format.too-many-args");
        assert_eq!(diag.message, "Too many arguments");
        assert_eq!(diag.range, None);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
