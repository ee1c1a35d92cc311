//! Error adapter for converting OrganelleError to miette diagnostics.
//!
//! Syntax errors in the ontology source carry the offending line, which is
//! rendered as a labelled snippet. Every other error is reported as a plain
//! message with a diagnostic code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use organelle::OrganelleError;
use organelle_ontology::{OboError, OntologyError};

/// Adapter for an OBO syntax error together with its source text.
pub struct OboAdapter<'a> {
    err: &'a OboError,
    src: &'a str,
}

impl<'a> OboAdapter<'a> {
    pub fn new(err: &'a OboError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for OboAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OboAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for OboAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ontology source: {}", self.err.message())
    }
}

impl std::error::Error for OboAdapter<'_> {}

impl MietteDiagnostic for OboAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("organelle::ontology::syntax"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span();
        let span = SourceSpan::new(span.start.into(), span.len());
        let message = format!("line {}", self.err.line());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message), span),
        )))
    }
}

/// Adapter for [`OrganelleError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a OrganelleError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OrganelleError::Io(_) => "organelle::io",
            OrganelleError::Ontology(_) => "organelle::ontology",
            OrganelleError::Input(_) => "organelle::input",
            OrganelleError::Structure(_) => "organelle::structure",
            OrganelleError::Layout(_) => "organelle::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            OrganelleError::Ontology(OntologyError::Io { .. }) => Some(Box::new(
                "set `strict = false` under [ontology] to continue with an empty ontology",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An ontology syntax error with its source snippet.
    Obo(OboAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Obo(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Obo(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Obo(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Obo(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Obo(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Obo(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`OrganelleError`] into a list of reportable errors.
pub fn to_reportables(err: &OrganelleError) -> Vec<Reportable<'_>> {
    match err {
        OrganelleError::Ontology(OntologyError::Parse { err: obo_err, src }) => {
            vec![Reportable::Obo(OboAdapter::new(obo_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
