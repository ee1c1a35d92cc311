//! Glyph box dimensions.
//!
//! A participant box is the size of its wrapped label plus a padding that
//! depends on the glyph's shape family. Families that carry decorations grow
//! further until every attachment has a border slot.

pub mod attachments;

use log::trace;

use organelle_core::{
    geometry::{Insets, Size},
    semantic::ShapeFamily,
    text::{TextMetrics, fit::TextFitter},
};

use crate::glyph::{EntityGlyph, Glyph};

/// Geometry rules of one shape family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyGeometry {
    padding: Insets,
    ratio: f32,
    corner_radius: f32,
    attachments: bool,
}

impl FamilyGeometry {
    const fn new(padding: Insets, ratio: f32, corner_radius: f32, attachments: bool) -> Self {
        Self {
            padding,
            ratio,
            corner_radius,
            attachments,
        }
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Width to height ratio of the label box.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Whether glyphs of the family draw attachment decorations.
    pub fn carries_attachments(&self) -> bool {
        self.attachments
    }
}

const SIMPLE_PADDING: Insets = Insets::new(5.0, 10.0, 5.0, 10.0);
const CONTAINER_PADDING: Insets = Insets::new(10.0, 15.0, 10.0, 15.0);
// Taller on top for the direction arrow
const GENE_PADDING: Insets = Insets::new(20.0, 10.0, 5.0, 10.0);

const ROUNDED: f32 = 8.0;
const DEFAULT_RATIO: f32 = 2.5;

/// Looks up the geometry rules of `shape`.
pub fn family_geometry(shape: ShapeFamily) -> FamilyGeometry {
    use ShapeFamily::*;

    match shape {
        Protein | ProteinDrug | Rna | RnaDrug => {
            FamilyGeometry::new(SIMPLE_PADDING, DEFAULT_RATIO, ROUNDED, true)
        }
        Chemical | ChemicalDrug => FamilyGeometry::new(SIMPLE_PADDING, 2.0, 0.0, false),
        Entity => FamilyGeometry::new(SIMPLE_PADDING, DEFAULT_RATIO, 0.0, false),
        Complex | ComplexDrug | EntitySet | EntitySetDrug => {
            FamilyGeometry::new(CONTAINER_PADDING, DEFAULT_RATIO, ROUNDED, true)
        }
        ProcessNode | EncapsulatedNode => {
            FamilyGeometry::new(CONTAINER_PADDING, DEFAULT_RATIO, ROUNDED, false)
        }
        Gene => FamilyGeometry::new(GENE_PADDING, 3.0, 0.0, true),
    }
}

/// Sizes participant glyphs at a fixed font size.
pub struct GeometrySizer<'a> {
    fitter: TextFitter<'a>,
    font_size: f32,
}

impl<'a> GeometrySizer<'a> {
    pub fn new(metrics: &'a dyn TextMetrics, font_size: f32) -> Self {
        Self {
            fitter: TextFitter::new(metrics),
            font_size,
        }
    }

    /// Box size for `label` in a glyph of `shape`, ignoring attachments.
    pub fn label_box(&self, label: &str, shape: ShapeFamily) -> Size {
        let geometry = family_geometry(shape);
        self.fitter
            .fit_dimensions(label, self.font_size, geometry.ratio())
            .add_padding(geometry.padding())
    }

    /// Sizes `glyph` at the origin, wraps its label and seats its
    /// attachments on the border.
    ///
    /// Attachments are expected only on families that carry them.
    pub fn size_entity(&self, glyph: &mut EntityGlyph) {
        let geometry = family_geometry(glyph.shape());
        let text = self
            .fitter
            .fit_dimensions(glyph.name(), self.font_size, geometry.ratio());
        let lines = self
            .fitter
            .wrap(glyph.name(), self.font_size, text)
            .unwrap_or_else(|| vec![glyph.name().to_string()]);

        let mut size = text.add_padding(geometry.padding());
        let count = glyph.attachments().len();
        if count > 0 {
            size = attachments::grow_to_fit(
                size,
                geometry.corner_radius(),
                geometry.ratio(),
                count,
            );
        }

        let position = glyph.position_mut();
        *position = Default::default();
        position.set_size(size);

        let centers = attachments::slot_centers(size, geometry.corner_radius(), count);
        for (attachment, center) in glyph.attachments_mut().iter_mut().zip(centers) {
            attachment.place_at(center);
        }

        trace!(
            glyph:% = glyph.id(),
            width = size.width(),
            height = size.height(),
            lines = lines.len();
            "Sized entity glyph"
        );
        glyph.set_label_lines(lines);
    }
}
