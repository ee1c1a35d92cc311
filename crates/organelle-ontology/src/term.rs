//! Ontology terms and their typed relationships.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use organelle_core::identifier::Id;

/// Direction of a relationship as seen from the term that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    /// Returns the direction the other end of an edge records.
    pub fn reverse(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
        }
    }
}

/// Kind of edge between two terms.
///
/// `IsA` edges form the subsumption DAG and are stored as parent/child sets;
/// every other type lives in the term's relationship map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    IsA,
    PartOf,
    HasPart,
    SurroundedBy,
    ComponentOf,
    Other(Id),
}

impl RelationshipType {
    /// Maps an OBO relationship name to its type.
    pub fn from_name(name: &str) -> Self {
        match name {
            "is_a" => Self::IsA,
            "part_of" => Self::PartOf,
            "has_part" => Self::HasPart,
            "surrounded_by" => Self::SurroundedBy,
            "component_of" => Self::ComponentOf,
            other => Self::Other(Id::new(other)),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsA => f.write_str("is_a"),
            Self::PartOf => f.write_str("part_of"),
            Self::HasPart => f.write_str("has_part"),
            Self::SurroundedBy => f.write_str("surrounded_by"),
            Self::ComponentOf => f.write_str("component_of"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A node of the ontology graph.
#[derive(Debug, Clone, PartialEq)]
pub struct OntologyTerm {
    id: Id,
    name: String,
    namespace: String,
    obsolete: bool,
    parents: IndexSet<Id>,
    children: IndexSet<Id>,
    relationships: IndexMap<(Direction, RelationshipType), IndexSet<Id>>,
}

impl OntologyTerm {
    pub fn new(id: Id, name: &str, namespace: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            namespace: namespace.to_string(),
            obsolete: false,
            parents: IndexSet::new(),
            children: IndexSet::new(),
            relationships: IndexMap::new(),
        }
    }

    pub fn with_obsolete(mut self, obsolete: bool) -> Self {
        self.obsolete = obsolete;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// Direct `is_a` parents.
    pub fn parents(&self) -> impl Iterator<Item = Id> + '_ {
        self.parents.iter().copied()
    }

    /// Direct `is_a` children.
    pub fn children(&self) -> impl Iterator<Item = Id> + '_ {
        self.children.iter().copied()
    }

    /// Terms directly related through `ty` in `direction`, without any
    /// inheritance over the `is_a` hierarchy.
    pub fn related(
        &self,
        direction: Direction,
        ty: RelationshipType,
    ) -> impl Iterator<Item = Id> + '_ {
        self.relationships
            .get(&(direction, ty))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Number of stored relationship edges, both directions.
    pub fn relationship_count(&self) -> usize {
        self.relationships.values().map(IndexSet::len).sum()
    }

    /// Returns a copy carrying the same identity but no edges at all.
    pub fn detached_copy(&self) -> Self {
        Self::new(self.id, &self.name, &self.namespace).with_obsolete(self.obsolete)
    }

    pub(crate) fn insert_relationship(
        &mut self,
        direction: Direction,
        ty: RelationshipType,
        other: Id,
    ) -> bool {
        self.relationships
            .entry((direction, ty))
            .or_default()
            .insert(other)
    }

    pub(crate) fn insert_parent(&mut self, parent: Id) -> bool {
        self.parents.insert(parent)
    }

    pub(crate) fn insert_child(&mut self, child: Id) -> bool {
        self.children.insert(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_names() {
        for name in ["is_a", "part_of", "has_part", "surrounded_by", "component_of"] {
            assert_eq!(RelationshipType::from_name(name).to_string(), name);
        }
        let other = RelationshipType::from_name("occurs_in");
        assert_eq!(other, RelationshipType::Other(Id::new("occurs_in")));
        assert_eq!(other.to_string(), "occurs_in");
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::Outgoing.reverse(), Direction::Incoming);
        assert_eq!(Direction::Incoming.reverse(), Direction::Outgoing);
    }

    #[test]
    fn test_insert_relationship_is_idempotent() {
        let mut term = OntologyTerm::new(Id::new("GO:1"), "a", "cellular_component");
        let target = Id::new("GO:2");
        assert!(term.insert_relationship(Direction::Outgoing, RelationshipType::PartOf, target));
        assert!(!term.insert_relationship(Direction::Outgoing, RelationshipType::PartOf, target));
        assert_eq!(term.relationship_count(), 1);
        assert_eq!(
            term.related(Direction::Outgoing, RelationshipType::PartOf)
                .collect::<Vec<_>>(),
            vec![target]
        );
        assert_eq!(
            term.related(Direction::Incoming, RelationshipType::PartOf).count(),
            0
        );
    }

    #[test]
    fn test_detached_copy_has_no_edges() {
        let mut term = OntologyTerm::new(Id::new("GO:1"), "a", "cellular_component")
            .with_obsolete(true);
        term.insert_parent(Id::new("GO:2"));
        term.insert_relationship(Direction::Incoming, RelationshipType::HasPart, Id::new("GO:3"));

        let copy = term.detached_copy();
        assert_eq!(copy.id(), term.id());
        assert_eq!(copy.name(), "a");
        assert!(copy.is_obsolete());
        assert_eq!(copy.parents().count(), 0);
        assert_eq!(copy.relationship_count(), 0);
    }
}
