//! Organelle Ontology
//!
//! Loads the cellular-component branch of an OBO ontology into an
//! [`OntologyGraph`] and answers typed relationship queries over it,
//! closed over the `is_a` hierarchy.
//!
//! ```no_run
//! use organelle_core::identifier::Id;
//! use organelle_ontology::{Direction, OntologyGraph, RelationshipType};
//!
//! let graph = OntologyGraph::load_or_empty("go-basic.obo");
//! let surrounding = graph.get_related(
//!     Id::new("GO:0005634"),
//!     Direction::Outgoing,
//!     RelationshipType::SurroundedBy,
//! );
//! ```

mod error;
mod graph;
mod obo;
mod term;
mod xref;

pub use error::{OboError, OntologyError};
pub use graph::{CELLULAR_COMPONENT, OntologyGraph};
pub use obo::{TermFrame, parse_obo};
pub use term::{Direction, OntologyTerm, RelationshipType};
pub use xref::{CrossReference, parse_cross_references};
