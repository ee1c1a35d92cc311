//! Error types for loading ontology sources.

use std::{io, ops::Range, path::PathBuf};

use thiserror::Error;

/// A syntax error in an OBO source, located by line and byte span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct OboError {
    line: usize,
    span: Range<usize>,
    message: String,
}

impl OboError {
    pub(crate) fn new(line: usize, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            span,
            message: message.into(),
        }
    }

    /// One-based line number of the offending line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte range of the offending line within the source.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while loading an ontology or a cross-reference source.
#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{err}")]
    Parse { err: OboError, src: String },
}

impl OntologyError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: OboError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
