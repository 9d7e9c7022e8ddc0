//! User-friendly diagnostic messages.
//!
//! Every fatal error is rendered once, by the binary, with its cause chain and
//! the `help` text of the first typed error in that chain.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use crate::core::manifest::ManifestError;
use crate::core::project::ProjectError;
use crate::ops::cfc_build::BuildError;

/// A fatal error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Build an error diagnostic from an `anyhow` error chain.
    ///
    /// The outermost message becomes the headline, inner causes become
    /// context lines, and typed errors contribute their `help` text.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let mut diag = Diagnostic::error(err.to_string());

        for cause in err.chain().skip(1) {
            diag = diag.with_context(cause.to_string());
        }

        for cause in err.chain() {
            if let Some(help) = help_for(cause) {
                diag = diag.with_suggestion(help);
            }
        }

        diag
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };
        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        let help_prefix = if color {
            "\x1b[1;32mhelp\x1b[0m"
        } else {
            "help"
        };
        for suggestion in &self.suggestions {
            output.push_str(&format!("{}: {}\n", help_prefix, suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Help text of a typed error, if `cause` is one.
fn help_for(cause: &(dyn std::error::Error + 'static)) -> Option<String> {
    let help = if let Some(e) = cause.downcast_ref::<ProjectError>() {
        e.help()
    } else if let Some(e) = cause.downcast_ref::<ManifestError>() {
        e.help()
    } else if let Some(e) = cause.downcast_ref::<BuildError>() {
        e.help()
    } else {
        None
    };
    help.map(|h| h.to_string())
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
