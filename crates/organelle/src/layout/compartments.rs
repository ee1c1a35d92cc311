//! Compartment boxes, computed bottom-up.
//!
//! A box encloses the outer bounds of its glyphs and the boxes of its
//! children, plus padding and a label band on top. Subtrees without glyphs
//! get label-sized boxes laid in a row under their parent's content.

use log::trace;

use organelle_core::{
    geometry::{Bounds, Point, Position},
    text::fit::TextFitter,
};

use crate::{
    compartment::CompartmentTree,
    glyph::{EntityGlyph, Glyph, GlyphRef, ReactionGlyph},
};

/// Box measurements shared by every compartment of a layout.
pub(crate) struct BoxStyle<'a> {
    pub fitter: &'a TextFitter<'a>,
    pub font_size: f32,
    pub padding: f32,
    pub spacing: f32,
}

/// Sets the box and label anchor of every node of `tree`.
pub(crate) fn fit_compartments(
    tree: &mut CompartmentTree,
    reaction: &ReactionGlyph,
    entities: &[EntityGlyph],
    style: &BoxStyle<'_>,
) {
    let mut occupied = vec![false; tree.len()];
    let line_height = style.fitter.line_height(style.font_size);

    for node in tree.post_order() {
        let mut content: Option<Bounds> = None;

        for glyph in tree.node(node).glyphs() {
            let bounds = match glyph {
                GlyphRef::Reaction => Some(reaction.bounds()),
                GlyphRef::Entity(id) => entities
                    .iter()
                    .find(|entity| entity.id() == id)
                    .map(Glyph::bounds),
            };
            if let Some(bounds) = bounds {
                grow(&mut content, bounds);
                occupied[node.index()] = true;
            }
        }

        let children = tree.node(node).children().to_vec();
        let (full, empty): (Vec<_>, Vec<_>) = children
            .into_iter()
            .partition(|child| occupied[child.index()]);
        for &child in &full {
            grow(&mut content, tree.node(child).position().bounds());
            occupied[node.index()] = true;
        }

        let (mut x, y) = content.map_or((0.0, 0.0), |content| {
            (content.min_x(), content.max_y() + style.spacing)
        });
        for child in empty {
            let bounds = tree.node(child).position().bounds();
            tree.translate_boxes(child, x - bounds.min_x(), y - bounds.min_y(), true);
            grow(&mut content, tree.node(child).position().bounds());
            x += bounds.width() + style.spacing;
        }

        let content = content.unwrap_or_default();
        let padding = style.padding;
        let label_width = style.fitter.text_width(tree.node(node).name(), style.font_size);

        let min_x = content.min_x() - padding;
        let min_y = content.min_y() - padding - line_height;
        let max_x = (content.max_x() + padding).max(min_x + label_width + 2.0 * padding);
        let max_y = content.max_y() + padding;

        let position = Position::new(min_x, min_y, max_x - min_x, max_y - min_y);
        let anchor = Point::new(min_x + padding, min_y + padding / 2.0);
        trace!(
            compartment:% = tree.node(node).id(),
            width = position.width(),
            height = position.height();
            "Fitted compartment box"
        );
        tree.node_mut(node).set_box(position, anchor);
    }
}

fn grow(content: &mut Option<Bounds>, bounds: Bounds) {
    *content = Some(content.map_or(bounds, |content| content.merge(&bounds)));
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use organelle_core::{
        geometry::Size,
        identifier::Id,
        semantic::{ReactionKind, RoleType, ShapeFamily},
        text::FixedWidthMetrics,
    };
    use organelle_ontology::{CELLULAR_COMPONENT, OntologyTerm, RelationshipType};

    use super::*;
    use crate::{compartment::NodeOrigin, glyph::GlyphId};

    fn term(id: &str, name: &str) -> OntologyTerm {
        OntologyTerm::new(Id::new(id), name, CELLULAR_COMPONENT)
    }

    #[test]
    fn test_boxes_nest_and_enclose_glyphs() {
        let mut tree = CompartmentTree::new(&term("GO:0005576", "extracellular region"));
        let root = tree.root();
        let cytosol = tree.insert(&term("GO:0005829", "cytosol"), NodeOrigin::Touched);
        let nucleus = tree.insert(&term("GO:0005634", "nucleus"), NodeOrigin::Touched);
        tree.set_parent(cytosol, root, RelationshipType::SurroundedBy)
            .unwrap();
        tree.set_parent(nucleus, root, RelationshipType::SurroundedBy)
            .unwrap();

        let mut reaction =
            ReactionGlyph::new(GlyphId::new(0), "R-1", "reaction", ReactionKind::Transition);
        reaction.place_at(Point::default());
        let mut entity = EntityGlyph::new(GlyphId::new(1), "e1", "ATP", ShapeFamily::Chemical)
            .with_role(RoleType::Input, 1);
        entity.position_mut().set_size(Size::new(40.0, 20.0));
        entity.move_bounds_to(-100.0, -10.0);

        tree.register_glyph(root, GlyphRef::Reaction);
        tree.register_glyph(cytosol, GlyphRef::Entity(GlyphId::new(1)));

        let metrics = FixedWidthMetrics::default();
        let fitter = TextFitter::new(&metrics);
        let style = BoxStyle {
            fitter: &fitter,
            font_size: 10.0,
            padding: 20.0,
            spacing: 20.0,
        };
        fit_compartments(&mut tree, &reaction, &[entity.clone()], &style);

        let cytosol_box = tree.node(cytosol).position().bounds();
        let root_box = tree.node(root).position().bounds();
        let nucleus_box = tree.node(nucleus).position().bounds();

        assert!(cytosol_box.contains(&entity.bounds()));
        assert!(root_box.contains(&cytosol_box));
        assert!(root_box.contains(&nucleus_box));
        assert!(root_box.contains(&reaction.bounds()));
        // Label band of one 12px line on top of the padding
        assert_approx_eq!(f32, cytosol_box.min_y(), -10.0 - 20.0 - 12.0);
        assert_eq!(
            tree.node(cytosol).label_anchor(),
            Point::new(cytosol_box.min_x() + 20.0, cytosol_box.min_y() + 10.0)
        );

        // The empty nucleus sits under the content of the root
        assert!(nucleus_box.min_y() >= cytosol_box.max_y());
        assert!(!nucleus_box.overlaps(&cytosol_box, 0.01));
        assert_approx_eq!(f32, nucleus_box.width(), 7.0 * 6.0 + 40.0, epsilon = 0.01);
    }

    #[test]
    fn test_box_is_widened_for_long_label() {
        let mut tree = CompartmentTree::new(&term(
            "GO:0005576",
            "a very long extracellular compartment name",
        ));
        let mut reaction =
            ReactionGlyph::new(GlyphId::new(0), "R-1", "reaction", ReactionKind::Transition);
        reaction.place_at(Point::default());
        let root = tree.root();
        tree.register_glyph(root, GlyphRef::Reaction);

        let metrics = FixedWidthMetrics::default();
        let fitter = TextFitter::new(&metrics);
        let style = BoxStyle {
            fitter: &fitter,
            font_size: 10.0,
            padding: 10.0,
            spacing: 20.0,
        };
        fit_compartments(&mut tree, &reaction, &[], &style);

        let label_width = fitter.text_width(tree.node(root).name(), 10.0);
        assert_approx_eq!(
            f32,
            tree.node(root).position().width(),
            label_width + 20.0
        );
        assert_approx_eq!(f32, tree.node(root).position().x(), -36.0);
    }
}
