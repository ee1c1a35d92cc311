//! Positioned, sized visual units of a reaction layout.
//!
//! Every glyph has a layout-scoped [`GlyphId`], a display name and a mutable
//! [`Position`]. The [`Glyph`] trait is the capability shared by the reaction
//! node, the participant glyphs and their attachment decorations.

mod attachment;
mod connector;
mod entity;
mod reaction;

pub use attachment::{ATTACHMENT_SIZE, AttachmentGlyph};
pub use connector::{Connector, ConnectorEdge, EndMarker, Segment, StoichiometryMarker};
pub use entity::{CATALYST_RESERVATION, EntityGlyph};
pub use reaction::{BACKBONE_LENGTH, REACTION_SIZE, ReactionGlyph};

use std::fmt;

use serde::Serialize;

use organelle_core::{
    geometry::{Bounds, Position},
    semantic::{ReactionKind, RoleType, ShapeFamily},
};

/// Layout-scoped unique glyph identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GlyphId(u32);

impl GlyphId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Hands out fresh [`GlyphId`]s for one layout.
#[derive(Debug, Default)]
pub struct GlyphIdGenerator {
    next: u32,
}

impl GlyphIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> GlyphId {
        let id = GlyphId(self.next);
        self.next += 1;
        id
    }
}

/// Shape tag of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "shape", rename_all = "snake_case")]
pub enum GlyphKind {
    Entity(ShapeFamily),
    Reaction(ReactionKind),
    Attachment,
}

/// A role a participant glyph plays, with its stoichiometric count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    #[serde(rename = "type")]
    role_type: RoleType,
    stoichiometry: u32,
}

impl Role {
    pub fn new(role_type: RoleType, stoichiometry: u32) -> Self {
        Self {
            role_type,
            stoichiometry,
        }
    }

    pub fn role_type(&self) -> RoleType {
        self.role_type
    }

    pub fn stoichiometry(&self) -> u32 {
        self.stoichiometry
    }

    /// Adds `count`, saturating at `u32::MAX`.
    pub(crate) fn add_stoichiometry(&mut self, count: u32) {
        self.stoichiometry = self.stoichiometry.saturating_add(count);
    }
}

/// Common capability of every glyph.
pub trait Glyph {
    fn id(&self) -> GlyphId;

    fn name(&self) -> &str;

    fn kind(&self) -> GlyphKind;

    fn position(&self) -> &Position;

    fn position_mut(&mut self) -> &mut Position;

    /// Outer bound used for stacking and collision decisions.
    ///
    /// Defaults to the glyph box; glyphs that reserve room around themselves
    /// widen it.
    fn bounds(&self) -> Bounds {
        self.position().bounds()
    }

    /// Moves the glyph together with everything it owns.
    fn translate(&mut self, dx: f32, dy: f32) {
        self.position_mut().translate(dx, dy);
    }

    /// Moves the glyph so its outer bound starts at `(x, y)`.
    fn move_bounds_to(&mut self, x: f32, y: f32) {
        let bounds = self.bounds();
        self.translate(x - bounds.min_x(), y - bounds.min_y());
    }
}

/// Reference to a glyph held by a compartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphRef {
    Reaction,
    Entity(GlyphId),
}
