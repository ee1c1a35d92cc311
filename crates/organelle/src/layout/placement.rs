//! Places participant glyphs around the reaction node and routes their
//! connectors.
//!
//! The reaction sits at the origin. Inputs form a column left of the
//! backbone, outputs a column right of it, catalysts a row above and
//! regulators a row below. Rows keep clear of everything placed before them,
//! so no two outer bounds overlap.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use organelle_core::{
    geometry::{Bounds, Point},
    semantic::RoleType,
};

use crate::{
    classify::Participants,
    glyph::{
        CATALYST_RESERVATION, Connector, ConnectorEdge, EntityGlyph, Glyph, GlyphId,
        ReactionGlyph,
    },
};

/// Gaps between the backbone ports and the participant stacks, in units of
/// glyph spacing.
const PORT_CLEARANCE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Places the reaction at the origin and every participant around it,
/// then builds one connector edge per role.
pub(crate) fn place_participants(
    reaction: &mut ReactionGlyph,
    entities: &mut [EntityGlyph],
    participants: &Participants,
    spacing: f32,
) {
    reaction.place_at(Point::default());

    let index: HashMap<GlyphId, usize> = entities
        .iter()
        .enumerate()
        .map(|(position, glyph)| (glyph.id(), position))
        .collect();

    let sides = [Side::Left, Side::Right, Side::Top, Side::Bottom];
    let mut placed = HashSet::new();
    let mut occupied = reaction.bounds();

    for (side, list) in sides.into_iter().zip(participants.lists()) {
        let members: Vec<usize> = list
            .iter()
            .filter(|&&id| placed.insert(id))
            .filter_map(|id| index.get(id).copied())
            .collect();
        if members.is_empty() {
            continue;
        }

        let extent = stack(reaction, entities, &members, side, spacing, occupied);
        occupied = occupied.merge(&extent);
        debug!(side:? = side, count = members.len(); "Placed participant stack");
    }

    for glyph in entities.iter_mut() {
        let connector = route(reaction, glyph);
        glyph.set_connector(connector);
    }
    trace!(bounds:? = occupied; "Participants placed");
}

/// Lays `members` out along `side` and returns the bounds they cover.
fn stack(
    reaction: &ReactionGlyph,
    entities: &mut [EntityGlyph],
    members: &[usize],
    side: Side,
    spacing: f32,
    occupied: Bounds,
) -> Bounds {
    let clearance = PORT_CLEARANCE * spacing;
    let vertical = matches!(side, Side::Left | Side::Right);

    let lengths: Vec<f32> = members
        .iter()
        .map(|&member| {
            let bounds = entities[member].bounds();
            if vertical {
                bounds.height()
            } else {
                bounds.width()
            }
        })
        .collect();
    let total = lengths.iter().sum::<f32>() + spacing * (lengths.len() - 1) as f32;

    let center = match side {
        Side::Left => reaction.input_port().y(),
        Side::Right => reaction.output_port().y(),
        Side::Top => reaction.catalyst_port().x(),
        Side::Bottom => reaction.regulator_port().x(),
    };
    let mut cursor = center - total / 2.0;
    let mut extent: Option<Bounds> = None;

    for (&member, length) in members.iter().zip(lengths) {
        let glyph = &mut entities[member];
        let bounds = glyph.bounds();
        let (x, y) = match side {
            Side::Left => (
                reaction.input_port().x() - clearance - bounds.width(),
                cursor,
            ),
            Side::Right => (reaction.output_port().x() + clearance, cursor),
            Side::Top => {
                let bottom = (reaction.catalyst_port().y() - clearance)
                    .min(occupied.min_y() - spacing);
                (cursor, bottom - bounds.height())
            }
            Side::Bottom => {
                let top = (reaction.regulator_port().y() + clearance)
                    .max(occupied.max_y() + spacing);
                (cursor, top)
            }
        };
        glyph.move_bounds_to(x, y);
        cursor += length + spacing;

        let placed = glyph.bounds();
        extent = Some(extent.map_or(placed, |extent| extent.merge(&placed)));
    }

    extent.unwrap_or(occupied)
}

/// Builds the connector of `glyph` with one edge per role.
///
/// Output edges run from the reaction to the glyph so their arrow lands on
/// it; every other edge runs from the glyph to the reaction.
fn route(reaction: &ReactionGlyph, glyph: &EntityGlyph) -> Connector {
    let mut connector = Connector::new();
    let box_bounds = glyph.position().bounds();

    for role in glyph.roles() {
        let count = role.stoichiometry();
        let edge = match role.role_type() {
            RoleType::Input => {
                let port = reaction.input_port();
                ConnectorEdge::through(RoleType::Input, &elbow(box_bounds, port), count)
            }
            RoleType::Output => {
                let port = reaction.output_port();
                let mut points = elbow(box_bounds, port);
                points.reverse();
                ConnectorEdge::through(RoleType::Output, &points, count)
            }
            RoleType::Catalyst if glyph.is_input_and_catalyst() => {
                let port = reaction.catalyst_port();
                let top = Point::new(box_bounds.center().x(), box_bounds.min_y());
                let lane = top.y() - CATALYST_RESERVATION / 2.0;
                let points = [
                    top,
                    Point::new(top.x(), lane),
                    Point::new(port.x(), lane),
                    port,
                ];
                ConnectorEdge::through(RoleType::Catalyst, &points, count)
            }
            RoleType::Catalyst => {
                let port = reaction.catalyst_port();
                ConnectorEdge::through(RoleType::Catalyst, &elbow(box_bounds, port), count)
            }
            role_type @ (RoleType::PositiveRegulator | RoleType::NegativeRegulator) => {
                let port = reaction.regulator_port();
                ConnectorEdge::through(role_type, &elbow(box_bounds, port), count)
            }
        };
        connector.push(edge);
    }
    connector
}

/// Orthogonal path from the side of `from` facing `port` to `port`.
///
/// Horizontal approaches bend at the middle x, vertical ones at the middle y.
fn elbow(from: Bounds, port: Point) -> Vec<Point> {
    let center = from.center();
    if port.x() > from.max_x() || port.x() < from.min_x() {
        let x = if port.x() > from.max_x() {
            from.max_x()
        } else {
            from.min_x()
        };
        let anchor = Point::new(x, center.y());
        let middle = (anchor.x() + port.x()) / 2.0;
        vec![
            anchor,
            Point::new(middle, anchor.y()),
            Point::new(middle, port.y()),
            port,
        ]
    } else {
        let y = if port.y() < from.min_y() {
            from.min_y()
        } else {
            from.max_y()
        };
        let anchor = Point::new(center.x(), y);
        let middle = (anchor.y() + port.y()) / 2.0;
        vec![
            anchor,
            Point::new(anchor.x(), middle),
            Point::new(port.x(), middle),
            port,
        ]
    }
}
