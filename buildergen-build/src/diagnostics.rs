//! Diagnostics reported for marked elements that could not be generated.

use std::fmt;

use crate::error::BuildError;
use crate::model::{EmittedUnit, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnsupportedDeclarationKind,
    UnsupportedEnclosingScope,
    InvalidIdentifier,
    RenderFailed,
    SinkWriteFailed,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedDeclarationKind => "UnsupportedDeclarationKind",
            Self::UnsupportedEnclosingScope => "UnsupportedEnclosingScope",
            Self::InvalidIdentifier => "InvalidIdentifier",
            Self::RenderFailed => "RenderFailed",
            Self::SinkWriteFailed => "SinkWriteFailed",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error directed at one marked element. Every diagnostic is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn from_error(error: &BuildError, location: Option<Location>) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind, self.message)?;
        if let Some(location) = &self.location {
            write!(f, "\n --> {location}")?;
        }
        Ok(())
    }
}

/// Outcome of processing one batch of marked elements.
#[derive(Debug, Default)]
pub struct Report {
    pub units: Vec<EmittedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn extend(&mut self, other: Report) {
        self.units.extend(other.units);
        self.diagnostics.extend(other.diagnostics);
    }

    /// Fail with every diagnostic in the message if any were reported.
    pub fn ensure_clean(self) -> anyhow::Result<Self> {
        if self.diagnostics.is_empty() {
            return Ok(self);
        }
        let rendered: Vec<String> = self.diagnostics.iter().map(ToString::to_string).collect();
        anyhow::bail!(
            "buildergen reported {} error(s):\n{}",
            self.diagnostics.len(),
            rendered.join("\n")
        )
    }
}
