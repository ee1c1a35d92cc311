//! The in-memory cellular-component ontology.
//!
//! The graph is built once and then shared read-only. Every typed
//! relationship is stored on both ends: creating `A -(T)-> B` records
//! `(Outgoing, T) -> B` on `A` and `(Incoming, T) -> A` on `B`. `is_a` edges
//! are kept apart as the parent/child DAG.

use std::{collections::HashMap, fs, path::Path};

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};

use organelle_core::identifier::Id;

use crate::{
    error::{OboError, OntologyError},
    obo,
    term::{Direction, OntologyTerm, RelationshipType},
    xref::{self, CrossReference},
};

/// Namespace of the terms the graph keeps.
pub const CELLULAR_COMPONENT: &str = "cellular_component";

/// Prefix added to bare accessions during key resolution.
const ACCESSION_PREFIX: &str = "GO:";

#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    terms: IndexMap<Id, OntologyTerm>,
}

impl OntologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from OBO source text.
    ///
    /// Only `cellular_component` terms are kept. Edges are wired after every
    /// term is known, and edges pointing outside the kept set are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`OboError`] found in the source.
    pub fn from_obo(source: &str) -> Result<Self, OboError> {
        let frames = obo::parse_obo(source)?;
        let mut graph = Self::new();

        let frames: Vec<_> = frames
            .into_iter()
            .filter(|frame| frame.namespace == CELLULAR_COMPONENT)
            .collect();

        for frame in &frames {
            let term = OntologyTerm::new(Id::new(&frame.id), &frame.name, &frame.namespace)
                .with_obsolete(frame.obsolete);
            if !graph.add_term(term) {
                warn!(term_id = frame.id.as_str(); "Duplicate ontology term, keeping the first");
            }
        }

        let mut dropped = 0usize;
        for frame in &frames {
            let source_id = Id::new(&frame.id);
            let is_a = frame
                .is_a
                .iter()
                .map(|parent| (RelationshipType::IsA, parent.as_str()));
            let typed = frame
                .relationships
                .iter()
                .map(|(kind, target)| (RelationshipType::from_name(kind), target.as_str()));

            for (ty, target) in is_a.chain(typed) {
                let target_id = Id::new(target);
                if !graph.contains(target_id) {
                    trace!(
                        source_id = frame.id.as_str(),
                        target_id = target,
                        relationship:% = ty;
                        "Dropping edge to unknown term"
                    );
                    dropped += 1;
                    continue;
                }
                graph.create_relationship(source_id, Direction::Outgoing, ty, target_id);
            }
        }

        info!(terms = graph.len(), dropped_edges = dropped; "Ontology graph built");
        Ok(graph)
    }

    /// Reads and parses an OBO file.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::Io`] when the file cannot be read and
    /// [`OntologyError::Parse`] when it is not valid OBO.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading ontology");
        let source = fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_obo(&source).map_err(|err| OntologyError::new_parse_error(err, source))
    }

    /// Like [`OntologyGraph::load`], but degrades to an empty graph on failure.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            warn!(err:% = err; "Ontology unavailable, continuing with an empty graph");
            Self::new()
        })
    }

    /// Adds a term with its edges stripped. Returns `false` if the id is
    /// already present, in which case the graph is unchanged.
    pub fn add_term(&mut self, term: OntologyTerm) -> bool {
        if self.terms.contains_key(&term.id()) {
            return false;
        }
        self.terms.insert(term.id(), term.detached_copy());
        true
    }

    pub fn term(&self, id: Id) -> Option<&OntologyTerm> {
        self.terms.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.terms.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &OntologyTerm> {
        self.terms.values()
    }

    /// Records an edge on both of its ends.
    ///
    /// `(Outgoing, IsA)` makes `target` a parent of `source`; `(Incoming, IsA)`
    /// makes it a child. Returns `true` if the edge is new. Self edges, edges
    /// to unknown terms and `is_a` edges that would close a cycle are
    /// rejected.
    pub fn create_relationship(
        &mut self,
        source: Id,
        direction: Direction,
        ty: RelationshipType,
        target: Id,
    ) -> bool {
        if source == target || !self.contains(source) || !self.contains(target) {
            return false;
        }

        if ty == RelationshipType::IsA {
            let (child, parent) = match direction {
                Direction::Outgoing => (source, target),
                Direction::Incoming => (target, source),
            };
            if self.ancestors(parent).contains(&child) {
                warn!(child:% = child, parent:% = parent; "Ignoring is_a edge that would close a cycle");
                return false;
            }
            let added = self
                .terms
                .get_mut(&child)
                .is_some_and(|term| term.insert_parent(parent));
            if let Some(term) = self.terms.get_mut(&parent) {
                term.insert_child(child);
            }
            return added;
        }

        let added = self
            .terms
            .get_mut(&source)
            .is_some_and(|term| term.insert_relationship(direction, ty, target));
        if let Some(term) = self.terms.get_mut(&target) {
            term.insert_relationship(direction.reverse(), ty, source);
        }
        added
    }

    /// Every `is_a` ancestor of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: Id) -> IndexSet<Id> {
        self.closure(id, |term| term.parents().collect())
    }

    /// Every `is_a` descendant of `id`, nearest first, excluding `id` itself.
    pub fn descendants(&self, id: Id) -> IndexSet<Id> {
        self.closure(id, |term| term.children().collect())
    }

    fn closure(&self, id: Id, next: impl Fn(&OntologyTerm) -> Vec<Id>) -> IndexSet<Id> {
        let mut found = IndexSet::new();
        let mut frontier = vec![id];
        while !frontier.is_empty() {
            let mut upcoming = Vec::new();
            for current in frontier {
                let Some(term) = self.terms.get(&current) else {
                    continue;
                };
                for neighbour in next(term) {
                    if neighbour != id && found.insert(neighbour) {
                        upcoming.push(neighbour);
                    }
                }
            }
            frontier = upcoming;
        }
        found
    }

    /// Terms related to `id` through `ty` in `direction`, closed over `is_a`.
    ///
    /// An outgoing query also collects the edges declared on every ancestor
    /// of `id`; an incoming query collects the edges declared on every
    /// descendant. For `IsA` itself this is the ancestor or descendant set.
    /// Unknown ids yield an empty set.
    pub fn get_related(&self, id: Id, direction: Direction, ty: RelationshipType) -> IndexSet<Id> {
        if !self.contains(id) {
            return IndexSet::new();
        }

        let lineage = match direction {
            Direction::Outgoing => self.ancestors(id),
            Direction::Incoming => self.descendants(id),
        };
        if ty == RelationshipType::IsA {
            return lineage;
        }

        std::iter::once(id)
            .chain(lineage)
            .filter_map(|member| self.terms.get(&member))
            .flat_map(|term| term.related(direction, ty))
            .filter(|&related| related != id)
            .collect()
    }

    /// Resolves an external key to a term id: by exact id, then as a bare
    /// accession, then by case-insensitive name.
    pub fn resolve(&self, key: &str) -> Option<Id> {
        self.resolve_with(key, &self.name_index())
    }

    fn resolve_with(&self, key: &str, names: &HashMap<String, Id>) -> Option<Id> {
        let key = key.trim();
        let exact = Id::new(key);
        if self.contains(exact) {
            return Some(exact);
        }
        if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
            let prefixed = Id::new(&format!("{ACCESSION_PREFIX}{key}"));
            if self.contains(prefixed) {
                return Some(prefixed);
            }
        }
        names.get(&key.to_lowercase()).copied()
    }

    fn name_index(&self) -> HashMap<String, Id> {
        let mut names = HashMap::new();
        for term in self.terms.values() {
            names.entry(term.name().to_lowercase()).or_insert(term.id());
        }
        names
    }

    /// Adds the edges of a cross-reference source. Returns how many new
    /// edges were recorded; unresolvable ones are dropped.
    pub fn apply_cross_references(&mut self, source: &str) -> usize {
        let references = xref::parse_cross_references(source);
        self.apply_references(&references)
    }

    fn apply_references(&mut self, references: &[CrossReference]) -> usize {
        let names = self.name_index();
        let mut added = 0;
        for reference in references {
            let subject = self.resolve_with(reference.subject(), &names);
            let object = self.resolve_with(reference.object(), &names);
            let (Some(subject), Some(object)) = (subject, object) else {
                debug!(
                    subject = reference.subject(),
                    object = reference.object();
                    "Dropping unresolvable cross-reference"
                );
                continue;
            };
            if self.create_relationship(
                subject,
                Direction::Outgoing,
                reference.relationship(),
                object,
            ) {
                added += 1;
            }
        }
        info!(edges = added; "Cross-references applied");
        added
    }

    /// Reads a cross-reference file and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::Io`] when the file cannot be read.
    pub fn load_cross_references(&mut self, path: impl AsRef<Path>) -> Result<usize, OntologyError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.apply_cross_references(&source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[Term]
id: GO:0005575
name: cellular_component
namespace: cellular_component

[Term]
id: GO:0005623
name: cell
namespace: cellular_component
is_a: GO:0005575

[Term]
id: GO:0005737
name: cytoplasm
namespace: cellular_component
is_a: GO:0005575
relationship: part_of GO:0005623 ! cell

[Term]
id: GO:0005829
name: cytosol
namespace: cellular_component
is_a: GO:0005575
relationship: part_of GO:0005737 ! cytoplasm

[Term]
id: GO:0008150
name: biological_process
namespace: biological_process
relationship: part_of GO:0005623
";

    fn id(s: &str) -> Id {
        Id::new(s)
    }

    fn node(graph: &mut OntologyGraph, key: &str, name: &str) -> Id {
        graph.add_term(OntologyTerm::new(id(key), name, CELLULAR_COMPONENT));
        id(key)
    }

    #[test]
    fn test_from_obo_filters_namespace() {
        let graph = OntologyGraph::from_obo(SAMPLE).unwrap();
        assert_eq!(graph.len(), 4);
        assert!(!graph.contains(id("GO:0008150")));
        let cell = graph.term(id("GO:0005623")).unwrap();
        assert_eq!(cell.name(), "cell");
        assert_eq!(
            cell.related(Direction::Incoming, RelationshipType::PartOf)
                .collect::<Vec<_>>(),
            vec![id("GO:0005737")]
        );
    }

    #[test]
    fn test_relationships_are_mirrored() {
        let mut graph = OntologyGraph::new();
        let a = node(&mut graph, "A", "a");
        let b = node(&mut graph, "B", "b");

        assert!(graph.create_relationship(a, Direction::Outgoing, RelationshipType::SurroundedBy, b));
        assert!(!graph.create_relationship(a, Direction::Outgoing, RelationshipType::SurroundedBy, b));
        assert!(!graph.create_relationship(b, Direction::Incoming, RelationshipType::SurroundedBy, a));

        let b_term = graph.term(b).unwrap();
        assert_eq!(
            b_term
                .related(Direction::Incoming, RelationshipType::SurroundedBy)
                .collect::<Vec<_>>(),
            vec![a]
        );
        assert_eq!(graph.term(a).unwrap().relationship_count(), 1);
    }

    #[test]
    fn test_rejects_self_and_unknown_edges() {
        let mut graph = OntologyGraph::new();
        let a = node(&mut graph, "A", "a");
        assert!(!graph.create_relationship(a, Direction::Outgoing, RelationshipType::PartOf, a));
        assert!(!graph.create_relationship(a, Direction::Outgoing, RelationshipType::PartOf, id("Z")));
    }

    #[test]
    fn test_is_a_cycle_rejected() {
        let mut graph = OntologyGraph::new();
        let a = node(&mut graph, "A", "a");
        let b = node(&mut graph, "B", "b");
        assert!(graph.create_relationship(a, Direction::Outgoing, RelationshipType::IsA, b));
        assert!(!graph.create_relationship(b, Direction::Outgoing, RelationshipType::IsA, a));
        assert_eq!(graph.term(b).unwrap().parents().count(), 0);
    }

    #[test]
    fn test_outgoing_inherits_from_ancestors() {
        let mut graph = OntologyGraph::new();
        let grandparent = node(&mut graph, "GP", "grandparent");
        let parent = node(&mut graph, "P", "parent");
        let child = node(&mut graph, "C", "child");
        let membrane = node(&mut graph, "M", "membrane");

        graph.create_relationship(child, Direction::Outgoing, RelationshipType::IsA, parent);
        graph.create_relationship(parent, Direction::Outgoing, RelationshipType::IsA, grandparent);
        graph.create_relationship(
            grandparent,
            Direction::Outgoing,
            RelationshipType::SurroundedBy,
            membrane,
        );

        let related = graph.get_related(child, Direction::Outgoing, RelationshipType::SurroundedBy);
        assert_eq!(related.into_iter().collect::<Vec<_>>(), vec![membrane]);

        let ancestors = graph.get_related(child, Direction::Outgoing, RelationshipType::IsA);
        assert_eq!(ancestors.into_iter().collect::<Vec<_>>(), vec![parent, grandparent]);
    }

    #[test]
    fn test_incoming_inherits_from_descendants() {
        let mut graph = OntologyGraph::new();
        let top = node(&mut graph, "T", "top");
        let middle = node(&mut graph, "M", "middle");
        let bottom = node(&mut graph, "B", "bottom");
        let part = node(&mut graph, "X", "part");

        graph.create_relationship(middle, Direction::Outgoing, RelationshipType::IsA, top);
        graph.create_relationship(bottom, Direction::Outgoing, RelationshipType::IsA, middle);
        graph.create_relationship(part, Direction::Outgoing, RelationshipType::PartOf, bottom);

        let related = graph.get_related(top, Direction::Incoming, RelationshipType::PartOf);
        assert_eq!(related.into_iter().collect::<Vec<_>>(), vec![part]);
        assert!(
            graph
                .get_related(top, Direction::Outgoing, RelationshipType::PartOf)
                .is_empty()
        );
    }

    #[test]
    fn test_get_related_unknown_term() {
        let graph = OntologyGraph::from_obo(SAMPLE).unwrap();
        assert!(
            graph
                .get_related(id("GO:9999999"), Direction::Outgoing, RelationshipType::PartOf)
                .is_empty()
        );
    }

    #[test]
    fn test_resolve_keys() {
        let graph = OntologyGraph::from_obo(SAMPLE).unwrap();
        assert_eq!(graph.resolve("GO:0005829"), Some(id("GO:0005829")));
        assert_eq!(graph.resolve("0005829"), Some(id("GO:0005829")));
        assert_eq!(graph.resolve("Cytosol"), Some(id("GO:0005829")));
        assert_eq!(graph.resolve("nucleus"), None);
    }

    #[test]
    fn test_apply_cross_references() {
        let mut graph = OntologyGraph::from_obo(SAMPLE).unwrap();
        let added = graph.apply_cross_references(
            "0005737\tsurrounded_by\tcell\ncytosol\tcomponent_of\tunknown\n",
        );
        assert_eq!(added, 1);
        let related = graph.get_related(
            id("GO:0005737"),
            Direction::Outgoing,
            RelationshipType::SurroundedBy,
        );
        assert!(related.contains(&id("GO:0005623")));
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let graph = OntologyGraph::load_or_empty(dir.path().join("missing.obo"));
        assert!(graph.is_empty());
        assert!(matches!(
            OntologyGraph::load(dir.path().join("missing.obo")),
            Err(OntologyError::Io { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.obo");
        fs::write(&path, "[Term]\nid: GO:1\nnot a tag\n").unwrap();
        match OntologyGraph::load(&path) {
            Err(OntologyError::Parse { err, src }) => {
                assert_eq!(err.line(), 3);
                assert_eq!(&src[err.span()], "not a tag");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
