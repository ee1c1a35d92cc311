//! Builds the minimal compartment tree connecting the touched compartments
//! to the fixed root.
//!
//! Each touched term is connected by searching the ontology along outgoing
//! relationships in a fixed priority order. A neighbour that is already in
//! the tree (or is itself touched) ends the search; otherwise the search
//! recurses depth-first through the neighbours in the same order. Terms that
//! cannot reach anything are hung from the root with `surrounded_by`.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use organelle_core::identifier::Id;
use organelle_ontology::{
    CELLULAR_COMPONENT, Direction, OntologyGraph, OntologyTerm, RelationshipType,
};

use super::{CompartmentTree, NodeIndex, NodeOrigin};
use crate::error::OrganelleError;

/// Relationship types tried when connecting a term, first hit wins.
pub const RELATIONSHIP_PRIORITY: [RelationshipType; 4] = [
    RelationshipType::SurroundedBy,
    RelationshipType::ComponentOf,
    RelationshipType::PartOf,
    RelationshipType::IsA,
];

/// One step of a connection path: the relationship from the previous term
/// to `target`.
type Hop = (RelationshipType, Id);

pub struct CompartmentTreeBuilder<'a> {
    graph: &'a OntologyGraph,
    root: Id,
    root_name: String,
}

impl<'a> CompartmentTreeBuilder<'a> {
    /// `root_name` labels the root when the graph does not know `root`.
    pub fn new(graph: &'a OntologyGraph, root: Id, root_name: &str) -> Self {
        Self {
            graph,
            root,
            root_name: root_name.to_string(),
        }
    }

    /// Builds the tree for the `touched` compartment ids.
    ///
    /// Unknown ids are reported and skipped. The root is always present
    /// exactly once, whether or not it is touched.
    ///
    /// # Errors
    ///
    /// Returns [`OrganelleError::Structure`] if a node would receive a second
    /// parent; this indicates a bug in the search rather than bad input.
    pub fn build(&self, touched: &IndexSet<Id>) -> Result<CompartmentTree, OrganelleError> {
        let root_term = self.graph.term(self.root).cloned().unwrap_or_else(|| {
            OntologyTerm::new(self.root, &self.root_name, CELLULAR_COMPONENT)
        });
        let mut tree = CompartmentTree::new(&root_term);

        let mut selected = IndexSet::new();
        for &id in touched {
            if id == self.root {
                continue;
            }
            if self.graph.contains(id) {
                selected.insert(id);
            } else {
                warn!(compartment:% = id; "Compartment not found in ontology, skipping");
            }
        }

        for &id in &selected {
            let Some(term) = self.graph.term(id) else {
                continue;
            };
            let node = tree.insert(term, NodeOrigin::Touched);
            if tree.node(node).parent().is_some() {
                continue;
            }
            self.connect(&mut tree, &selected, node)?;
        }

        info!(nodes = tree.len(), touched = selected.len(); "Compartment tree built");
        Ok(tree)
    }

    fn connect(
        &self,
        tree: &mut CompartmentTree,
        selected: &IndexSet<Id>,
        node: NodeIndex,
    ) -> Result<(), OrganelleError> {
        let id = tree.node(node).id();
        let mut visited = HashSet::from([id]);

        let Some(path) = self.find_path(tree, selected, node, id, &mut visited) else {
            debug!(compartment:% = id; "No connection found, attaching to root");
            return tree.set_parent(node, tree.root(), RelationshipType::SurroundedBy);
        };
        trace!(compartment:% = id, hops = path.len(); "Connection path found");

        let mut current = node;
        for (relationship, target) in path {
            let parent = match tree.find(target) {
                Some(index) => index,
                None => {
                    let term = self.graph.term(target).ok_or_else(|| {
                        OrganelleError::Structure(format!("compartment {target} is not in the ontology"))
                    })?;
                    let origin = if selected.contains(&target) {
                        NodeOrigin::Touched
                    } else {
                        NodeOrigin::Connective
                    };
                    tree.insert(term, origin)
                }
            };
            tree.set_parent(current, parent, relationship)?;
            current = parent;
        }
        Ok(())
    }

    /// Whether `candidate` can end a search started from `node`.
    fn is_target(
        &self,
        tree: &CompartmentTree,
        selected: &IndexSet<Id>,
        node: NodeIndex,
        candidate: Id,
    ) -> bool {
        if candidate == self.root {
            return true;
        }
        match tree.find(candidate) {
            // A node below `node` would close a cycle
            Some(index) => !tree.is_ancestor(node, index),
            None => selected.contains(&candidate),
        }
    }

    /// Depth-first search for the hops leading from `from` to a target.
    ///
    /// Direct neighbours are checked for every relationship type before any
    /// recursion happens.
    fn find_path(
        &self,
        tree: &CompartmentTree,
        selected: &IndexSet<Id>,
        node: NodeIndex,
        from: Id,
        visited: &mut HashSet<Id>,
    ) -> Option<Vec<Hop>> {
        let related: Vec<_> = RELATIONSHIP_PRIORITY
            .iter()
            .map(|&relationship| {
                (
                    relationship,
                    self.graph.get_related(from, Direction::Outgoing, relationship),
                )
            })
            .collect();

        for (relationship, neighbours) in &related {
            if let Some(&hit) = neighbours
                .iter()
                .find(|&&neighbour| self.is_target(tree, selected, node, neighbour))
            {
                return Some(vec![(*relationship, hit)]);
            }
        }

        for (relationship, neighbours) in related {
            for neighbour in neighbours {
                if tree.contains(neighbour) || !visited.insert(neighbour) {
                    continue;
                }
                if let Some(mut rest) = self.find_path(tree, selected, node, neighbour, visited) {
                    rest.insert(0, (relationship, neighbour));
                    return Some(rest);
                }
            }
        }
        None
    }
}
