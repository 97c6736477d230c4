use std::io;

use thiserror::Error;

use crate::diagnostics::DiagnosticKind;
use crate::marker::MarkerKind;

/// Failure while turning one marked element into a unit.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The marker sits on a declaration it cannot be applied to.
    #[error("{marker} can only be applied to {accepts}; you supplied: {found}")]
    UnsupportedDeclarationKind {
        marker: MarkerKind,
        accepts: &'static str,
        found: String,
    },

    /// The naming walk reached a scope that is neither a type nor a module.
    #[error("unrecognised scope {kind} `{name}` enclosing the declaration")]
    UnsupportedEnclosingScope { kind: &'static str, name: String },

    /// The builder name is not a legal identifier.
    #[error("`{name}` is not a valid builder identifier")]
    InvalidBuilderName { name: String },

    /// The configured crate root does not form a path to the target.
    #[error("`{path}` is not a valid target path")]
    InvalidTargetPath { path: String },

    /// The generated tokens did not form a source file.
    #[error("failed to render {address}: {source}")]
    Render {
        address: String,
        #[source]
        source: syn::Error,
    },

    /// The sink rejected the unit.
    #[error("failed to write {address}: {source}")]
    SinkWriteFailed {
        address: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub fn unsupported(marker: MarkerKind, found: impl Into<String>) -> Self {
        Self::UnsupportedDeclarationKind {
            marker,
            accepts: marker.accepts(),
            found: found.into(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::UnsupportedDeclarationKind { .. } => DiagnosticKind::UnsupportedDeclarationKind,
            Self::UnsupportedEnclosingScope { .. } => DiagnosticKind::UnsupportedEnclosingScope,
            Self::InvalidBuilderName { .. } | Self::InvalidTargetPath { .. } => DiagnosticKind::InvalidIdentifier,
            Self::Render { .. } => DiagnosticKind::RenderFailed,
            Self::SinkWriteFailed { .. } => DiagnosticKind::SinkWriteFailed,
        }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
