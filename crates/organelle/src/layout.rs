//! The finished geometry of one reaction.
//!
//! A [`Layout`] owns the reaction glyph, the participant glyphs after
//! deduplication and the compartment tree whose nodes reference them. It is
//! built once by [`LayoutBuilder`](crate::LayoutBuilder) and read-only
//! afterwards, except for whole-compartment translation.
//!
//! # Submodules
//!
//! - `placement` - Positions glyphs around the reaction and routes connectors
//! - `compartments` - Computes compartment boxes bottom-up

mod compartments;
mod placement;

pub(crate) use compartments::{BoxStyle, fit_compartments};
pub(crate) use placement::place_participants;

use serde::Serialize;

use organelle_core::geometry::Bounds;

use crate::{
    classify::Participants,
    compartment::{CompartmentTree, NodeIndex},
    glyph::{EntityGlyph, Glyph, GlyphId, GlyphRef, ReactionGlyph},
};

/// A laid out reaction, ready for rendering or export.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    reaction: ReactionGlyph,
    entities: Vec<EntityGlyph>,
    compartments: CompartmentTree,
    participants: Participants,
}

impl Layout {
    pub(crate) fn new(
        reaction: ReactionGlyph,
        entities: Vec<EntityGlyph>,
        compartments: CompartmentTree,
        participants: Participants,
    ) -> Self {
        Self {
            reaction,
            entities,
            compartments,
            participants,
        }
    }

    pub fn reaction(&self) -> &ReactionGlyph {
        &self.reaction
    }

    /// Participant glyphs, each split-off copy right after its original.
    pub fn entities(&self) -> &[EntityGlyph] {
        &self.entities
    }

    pub fn entity(&self, id: GlyphId) -> Option<&EntityGlyph> {
        self.entities.iter().find(|glyph| glyph.id() == id)
    }

    /// All glyphs of one physical entity.
    pub fn entity_glyphs<'a>(
        &'a self,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a EntityGlyph> + 'a {
        self.entities
            .iter()
            .filter(move |glyph| glyph.entity_id() == entity_id)
    }

    pub fn compartments(&self) -> &CompartmentTree {
        &self.compartments
    }

    pub fn participants(&self) -> &Participants {
        &self.participants
    }

    /// Outer bound of the whole layout: the root compartment box.
    pub fn bounds(&self) -> Bounds {
        self.compartments
            .node(self.compartments.root())
            .position()
            .bounds()
    }

    /// Moves a compartment box and its label.
    ///
    /// With `move_content`, every glyph directly contained in the
    /// compartment and every descendant compartment moves along,
    /// recursively.
    pub fn translate_compartment(
        &mut self,
        node: NodeIndex,
        dx: f32,
        dy: f32,
        move_content: bool,
    ) {
        self.compartments.translate_boxes(node, dx, dy, false);
        if !move_content {
            return;
        }

        let glyphs: Vec<GlyphRef> = self.compartments.node(node).glyphs().collect();
        for glyph in glyphs {
            match glyph {
                GlyphRef::Reaction => self.reaction.translate(dx, dy),
                GlyphRef::Entity(id) => {
                    if let Some(entity) = self.entities.iter_mut().find(|entity| entity.id() == id)
                    {
                        entity.translate(dx, dy);
                    }
                }
            }
        }

        let children = self.compartments.node(node).children().to_vec();
        for child in children {
            self.translate_compartment(child, dx, dy, true);
        }
    }

    /// Moves everything so the root box starts at the origin.
    pub(crate) fn normalize(&mut self) {
        let bounds = self.bounds();
        let root = self.compartments.root();
        self.translate_compartment(root, -bounds.min_x(), -bounds.min_y(), true);
    }
}
