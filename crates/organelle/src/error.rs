//! Error types for Organelle operations.
//!
//! This module provides the main error type [`OrganelleError`] which wraps
//! the error conditions that can occur while building a reaction layout.

use std::io;

use thiserror::Error;

use organelle_ontology::OntologyError;

/// The main error type for Organelle operations.
///
/// Unfittable text is not represented here: fitting returns `None` and the
/// label is omitted.
#[derive(Debug, Error)]
pub enum OrganelleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ontology(#[from] OntologyError),

    /// The reaction document could not be decoded.
    #[error("Invalid reaction input: {0}")]
    Input(String),

    /// A structural invariant was violated, e.g. a compartment received a
    /// second parent or a participant had a zero stoichiometry.
    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Layout error: {0}")]
    Layout(String),
}
