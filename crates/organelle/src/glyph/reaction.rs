use serde::Serialize;

use organelle_core::{
    geometry::{Bounds, Insets, Point, Position},
    identifier::Id,
    semantic::ReactionKind,
};

use super::{Glyph, GlyphId, GlyphKind, Segment};

/// Side of the reaction node square.
pub const REACTION_SIZE: f32 = 12.0;

/// Length of the backbone line on either side of the reaction node.
pub const BACKBONE_LENGTH: f32 = 20.0;

/// The reaction node with its backbone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionGlyph {
    id: GlyphId,
    reaction_id: String,
    name: String,
    kind: ReactionKind,
    disease: bool,
    compartment: Option<Id>,
    position: Position,
    backbone: Vec<Segment>,
}

impl ReactionGlyph {
    pub fn new(id: GlyphId, reaction_id: &str, name: &str, kind: ReactionKind) -> Self {
        Self {
            id,
            reaction_id: reaction_id.to_string(),
            name: name.to_string(),
            kind,
            disease: false,
            compartment: None,
            position: Position::new(0.0, 0.0, REACTION_SIZE, REACTION_SIZE),
            backbone: Vec::new(),
        }
    }

    pub fn with_disease(mut self, disease: bool) -> Self {
        self.disease = disease;
        self
    }

    pub fn with_compartment(mut self, compartment: Option<Id>) -> Self {
        self.compartment = compartment;
        self
    }

    pub fn reaction_id(&self) -> &str {
        &self.reaction_id
    }

    pub fn reaction_kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn is_disease(&self) -> bool {
        self.disease
    }

    pub fn compartment(&self) -> Option<Id> {
        self.compartment
    }

    pub fn backbone(&self) -> &[Segment] {
        &self.backbone
    }

    /// Where inputs connect: the left end of the backbone.
    pub fn input_port(&self) -> Point {
        Point::new(self.position.x() - BACKBONE_LENGTH, self.position.center_y())
    }

    /// Where outputs connect: the right end of the backbone.
    pub fn output_port(&self) -> Point {
        Point::new(self.position.max_x() + BACKBONE_LENGTH, self.position.center_y())
    }

    /// Where catalysts connect: the top of the node.
    pub fn catalyst_port(&self) -> Point {
        Point::new(self.position.center_x(), self.position.y())
    }

    /// Where regulators connect: the bottom of the node.
    pub fn regulator_port(&self) -> Point {
        Point::new(self.position.center_x(), self.position.max_y())
    }

    /// Centers the node on `center` and rebuilds the backbone around it.
    pub fn place_at(&mut self, center: Point) {
        self.position.set_center(center);
        let y = self.position.center_y();
        self.backbone = vec![
            Segment::new(self.input_port(), Point::new(self.position.x(), y)),
            Segment::new(Point::new(self.position.max_x(), y), self.output_port()),
        ];
    }

    pub(crate) fn set_compartment(&mut self, compartment: Id) {
        self.compartment = Some(compartment);
    }
}

impl Glyph for ReactionGlyph {
    fn id(&self) -> GlyphId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> GlyphKind {
        GlyphKind::Reaction(self.kind)
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// The node box extended by the backbone on both sides.
    fn bounds(&self) -> Bounds {
        self.position
            .bounds()
            .add_padding(Insets::new(0.0, BACKBONE_LENGTH, 0.0, BACKBONE_LENGTH))
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.position.translate(dx, dy);
        for segment in &mut self.backbone {
            segment.translate(dx, dy);
        }
    }
}
