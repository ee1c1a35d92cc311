//! The reaction-scoped compartment tree.
//!
//! Nodes live in an arena and refer to each other by [`NodeIndex`]. The
//! tree is strictly single-parent: assigning a second parent is a
//! structural error. Each node wraps a detached copy of its ontology term,
//! so the tree never aliases the shared [`OntologyGraph`].
//!
//! [`OntologyGraph`]: organelle_ontology::OntologyGraph

mod builder;

pub use builder::CompartmentTreeBuilder;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use organelle_core::{
    geometry::{Point, Position},
    identifier::Id,
};
use organelle_ontology::{OntologyTerm, RelationshipType};

use crate::{error::OrganelleError, glyph::GlyphRef};

/// Index of a node within its [`CompartmentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Why a node is part of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOrigin {
    /// The fixed outermost compartment.
    Root,
    /// Referenced by the reaction or one of its participants.
    Touched,
    /// Added only to connect touched compartments.
    Connective,
}

#[derive(Debug, Clone)]
pub struct CompartmentNode {
    term: OntologyTerm,
    origin: NodeOrigin,
    parent: Option<(NodeIndex, RelationshipType)>,
    children: Vec<NodeIndex>,
    glyphs: IndexSet<GlyphRef>,
    position: Position,
    label_anchor: Point,
}

impl CompartmentNode {
    fn new(term: &OntologyTerm, origin: NodeOrigin) -> Self {
        Self {
            term: term.detached_copy(),
            origin,
            parent: None,
            children: Vec::new(),
            glyphs: IndexSet::new(),
            position: Position::default(),
            label_anchor: Point::default(),
        }
    }

    pub fn id(&self) -> Id {
        self.term.id()
    }

    pub fn name(&self) -> &str {
        self.term.name()
    }

    pub fn origin(&self) -> NodeOrigin {
        self.origin
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent.map(|(parent, _)| parent)
    }

    /// Relationship type linking this node to its parent.
    pub fn relationship(&self) -> Option<RelationshipType> {
        self.parent.map(|(_, relationship)| relationship)
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Glyphs directly contained in this compartment.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphRef> + '_ {
        self.glyphs.iter().copied()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Top-left point of the compartment label.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }

    pub(crate) fn set_box(&mut self, position: Position, label_anchor: Point) {
        self.position = position;
        self.label_anchor = label_anchor;
    }

    /// Moves the box and its label, not its content.
    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        self.position.translate(dx, dy);
        self.label_anchor = self.label_anchor.translate(dx, dy);
    }
}

impl Serialize for CompartmentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompartmentNode", 8)?;
        state.serialize_field("id", &self.id())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("parent", &self.parent())?;
        state.serialize_field(
            "relationship",
            &self.relationship().map(|relationship| relationship.to_string()),
        )?;
        state.serialize_field("glyphs", &self.glyphs)?;
        state.serialize_field("position", &self.position)?;
        state.serialize_field("label_anchor", &self.label_anchor)?;
        state.end()
    }
}

/// Single-rooted tree of compartments for one reaction.
#[derive(Debug, Clone)]
pub struct CompartmentTree {
    nodes: Vec<CompartmentNode>,
    by_id: IndexMap<Id, NodeIndex>,
}

impl CompartmentTree {
    /// Creates a tree holding only `root`.
    pub fn new(root: &OntologyTerm) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            by_id: IndexMap::new(),
        };
        tree.insert(root, NodeOrigin::Root);
        tree
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was produced by another tree.
    pub fn node(&self, index: NodeIndex) -> &CompartmentNode {
        &self.nodes[index.0]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut CompartmentNode {
        &mut self.nodes[index.0]
    }

    pub fn find(&self, id: Id) -> Option<NodeIndex> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Node indices in insertion order, root first.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CompartmentNode> {
        self.nodes.iter()
    }

    /// Adds a node for `term`, or returns the existing one.
    pub fn insert(&mut self, term: &OntologyTerm, origin: NodeOrigin) -> NodeIndex {
        if let Some(index) = self.find(term.id()) {
            return index;
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(CompartmentNode::new(term, origin));
        self.by_id.insert(term.id(), index);
        index
    }

    /// Hangs `child` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`OrganelleError::Structure`] if `child` already has a parent,
    /// is the root, or is an ancestor of `parent`.
    pub fn set_parent(
        &mut self,
        child: NodeIndex,
        parent: NodeIndex,
        relationship: RelationshipType,
    ) -> Result<(), OrganelleError> {
        let child_node = self.node(child);
        if let Some(existing) = child_node.parent() {
            return Err(OrganelleError::Structure(format!(
                "compartment {} already has parent {}, cannot add {}",
                child_node.id(),
                self.node(existing).id(),
                self.node(parent).id(),
            )));
        }
        if child == self.root() || self.is_ancestor(child, parent) {
            return Err(OrganelleError::Structure(format!(
                "attaching compartment {} under {} would create a cycle",
                child_node.id(),
                self.node(parent).id(),
            )));
        }

        self.nodes[child.0].parent = Some((parent, relationship));
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut current = Some(node);
        while let Some(index) = current {
            if index == ancestor {
                return true;
            }
            current = self.node(index).parent();
        }
        false
    }

    /// Records `glyph` as directly contained in `node`.
    pub fn register_glyph(&mut self, node: NodeIndex, glyph: GlyphRef) {
        self.nodes[node.0].glyphs.insert(glyph);
    }

    /// Children before parents, children in insertion order.
    pub fn post_order(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.collect_post_order(self.root(), &mut order);
        order
    }

    fn collect_post_order(&self, index: NodeIndex, order: &mut Vec<NodeIndex>) {
        for &child in self.node(index).children() {
            self.collect_post_order(child, order);
        }
        order.push(index);
    }

    /// Depth of `node`; the root has depth 0.
    pub fn depth(&self, node: NodeIndex) -> usize {
        let mut depth = 0;
        let mut current = self.node(node).parent();
        while let Some(index) = current {
            depth += 1;
            current = self.node(index).parent();
        }
        depth
    }

    /// Moves the boxes and labels of `node`, and of its descendants when
    /// `recursive` is set. Glyphs are not touched.
    pub fn translate_boxes(&mut self, node: NodeIndex, dx: f32, dy: f32, recursive: bool) {
        self.nodes[node.0].translate(dx, dy);
        if recursive {
            let children = self.nodes[node.0].children.clone();
            for child in children {
                self.translate_boxes(child, dx, dy, true);
            }
        }
    }
}

impl Serialize for CompartmentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nodes.serialize(serializer)
    }
}
