//! Lines joining a participant glyph to the reaction node.

use serde::Serialize;

use organelle_core::{
    geometry::{Point, Position, Size},
    semantic::RoleType,
};

/// Side of the square that carries a stoichiometry count.
pub const STOICHIOMETRY_MARKER_SIZE: f32 = 12.0;

/// A straight piece of a connector line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    from: Point,
    to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    pub fn length(&self) -> f32 {
        (self.to.x() - self.from.x()).hypot(self.to.y() - self.from.y())
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.from = self.from.translate(dx, dy);
        self.to = self.to.translate(dx, dy);
    }
}

/// Decoration drawn at the end of a connector edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndMarker {
    Arrow,
    Circle,
    OpenArrow,
    Bar,
}

impl EndMarker {
    /// Marker for a role; inputs end without one.
    pub fn for_role(role: RoleType) -> Option<Self> {
        match role {
            RoleType::Input => None,
            RoleType::Output => Some(Self::Arrow),
            RoleType::Catalyst => Some(Self::Circle),
            RoleType::PositiveRegulator => Some(Self::OpenArrow),
            RoleType::NegativeRegulator => Some(Self::Bar),
        }
    }
}

/// Box carrying a stoichiometry count on a connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoichiometryMarker {
    value: u32,
    position: Position,
}

impl StoichiometryMarker {
    pub fn new(value: u32, center: Point) -> Self {
        Self {
            value,
            position: Position::from_center(
                center,
                Size::new(STOICHIOMETRY_MARKER_SIZE, STOICHIOMETRY_MARKER_SIZE),
            ),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// The line for one role of a participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorEdge {
    role: RoleType,
    segments: Vec<Segment>,
    end_marker: Option<EndMarker>,
    stoichiometry: Option<StoichiometryMarker>,
}

impl ConnectorEdge {
    /// Builds an edge along `points`, dropping zero-length pieces.
    ///
    /// The stoichiometry marker sits on the first segment when `count > 1`.
    pub fn through(role: RoleType, points: &[Point], count: u32) -> Self {
        let segments: Vec<_> = points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .filter(|segment| segment.length() > f32::EPSILON)
            .collect();
        let stoichiometry = match segments.first() {
            Some(first) if count > 1 => Some(StoichiometryMarker::new(count, first.midpoint())),
            _ => None,
        };
        Self {
            role,
            segments,
            end_marker: EndMarker::for_role(role),
            stoichiometry,
        }
    }

    pub fn role(&self) -> RoleType {
        self.role
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn end_marker(&self) -> Option<EndMarker> {
        self.end_marker
    }

    pub fn stoichiometry(&self) -> Option<&StoichiometryMarker> {
        self.stoichiometry.as_ref()
    }

    /// Point the end marker is drawn at.
    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::to)
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        for segment in &mut self.segments {
            segment.translate(dx, dy);
        }
        if let Some(marker) = &mut self.stoichiometry {
            marker.position.translate(dx, dy);
        }
    }
}

/// All connector edges of one participant glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Connector {
    edges: Vec<ConnectorEdge>,
}

impl Connector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edge: ConnectorEdge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[ConnectorEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        for edge in &mut self.edges {
            edge.translate(dx, dy);
        }
    }
}
