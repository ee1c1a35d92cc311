use serde::Serialize;

use organelle_core::geometry::{Point, Position};

use super::{Glyph, GlyphId, GlyphKind};

/// Side of the square attachment decoration.
pub const ATTACHMENT_SIZE: f32 = 12.0;

/// A decoration, such as a modified residue, sitting on a glyph border.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentGlyph {
    id: GlyphId,
    source_id: String,
    label: String,
    position: Position,
}

impl AttachmentGlyph {
    pub fn new(id: GlyphId, source_id: &str, label: &str) -> Self {
        Self {
            id,
            source_id: source_id.to_string(),
            label: label.to_string(),
            position: Position::new(0.0, 0.0, ATTACHMENT_SIZE, ATTACHMENT_SIZE),
        }
    }

    /// Identifier of the decoration in the input data.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Copies the decoration under a new identity.
    pub fn duplicate(&self, id: GlyphId) -> Self {
        Self { id, ..self.clone() }
    }

    pub(crate) fn place_at(&mut self, center: Point) {
        self.position.set_center(center);
    }
}

impl Glyph for AttachmentGlyph {
    fn id(&self) -> GlyphId {
        self.id
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> GlyphKind {
        GlyphKind::Attachment
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}
