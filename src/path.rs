//! Connector routing between an output port and an input port (or the cursor).

use crate::geometry::Point;
use std::fmt;

/// Minimum horizontal gap (end.x - start.x) for the curved route.
pub const CURVE_THRESHOLD: f32 = 50.0;
/// Corner radius of the orthogonal route.
pub const CORNER_RADIUS: f32 = 10.0;
/// Horizontal standoff kept clear of a node's edge.
pub const SAFE_AREA: f32 = 40.0;
/// Half of the default node height; the orthogonal lane clears it.
pub const NODE_HALF_HEIGHT: f32 = 50.0;
/// Length of each arrowhead stroke along both axes.
pub const ARROW_SIZE: f32 = 8.0;

/// Routing strategy picked for a pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorRoute {
    /// Smooth S-curve, used when the destination is far enough to the right.
    Curved,
    /// Right-angle route with rounded corners around the source node.
    Orthogonal,
}

impl ConnectorRoute {
    pub fn between(start: Point, end: Point) -> Self {
        if end.x - start.x >= CURVE_THRESHOLD {
            ConnectorRoute::Curved
        } else {
            ConnectorRoute::Orthogonal
        }
    }
}

/// A single SVG path command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Horizontal(f32),
    Vertical(f32),
    Quadratic { ctrl: Point, to: Point },
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::Horizontal(x) => write!(f, "H {}", x),
            PathCommand::Vertical(y) => write!(f, "V {}", y),
            PathCommand::Quadratic { ctrl, to } => {
                write!(f, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
            }
            PathCommand::Cubic { ctrl1, ctrl2, to } => write!(
                f,
                "C {} {} {} {} {} {}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
        }
    }
}

/// A routed connector: the body from start to end followed by the arrowhead.
///
/// Display renders SVG path commands, e.g. `"M 0 0 C 50 0 50 0 100 0 L 92 -8 M 100 0 L 92 8"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    route: ConnectorRoute,
    body: Vec<PathCommand>,
    arrow: [PathCommand; 3],
}

impl ConnectorPath {
    pub fn route(&self) -> ConnectorRoute {
        self.route
    }

    /// Commands from the start point up to (and including) arriving at the end point.
    pub fn body(&self) -> &[PathCommand] {
        &self.body
    }

    /// The two arrowhead strokes anchored at the end point.
    pub fn arrow(&self) -> &[PathCommand; 3] {
        &self.arrow
    }

    /// Iterate every command in drawing order.
    pub fn commands(&self) -> impl Iterator<Item = &PathCommand> + '_ {
        self.body.iter().chain(self.arrow.iter())
    }

    /// Pen position after the body, tracking absolute H/V moves.
    pub fn body_end(&self) -> Point {
        let mut pen = Point::default();
        for command in &self.body {
            pen = match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
                PathCommand::Horizontal(x) => Point::new(x, pen.y),
                PathCommand::Vertical(y) => Point::new(pen.x, y),
                PathCommand::Quadratic { to, .. } | PathCommand::Cubic { to, .. } => to,
            };
        }
        pen
    }
}

impl fmt::Display for ConnectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Route a connector from `start` (a source output port) to `end` (a target
/// input port or the live cursor position).
pub fn route_connector(start: Point, end: Point) -> ConnectorPath {
    let route = ConnectorRoute::between(start, end);
    let body = match route {
        ConnectorRoute::Curved => curved_body(start, end),
        ConnectorRoute::Orthogonal => orthogonal_body(start, end),
    };

    ConnectorPath {
        route,
        body,
        arrow: arrowhead(end),
    }
}

/// Generate the SVG path command string for a connector.
///
/// # Returns
/// SVG path commands, e.g. `"M 0 0 C 100 0 100 50 200 50 L 192 42 M 200 50 L 192 58"`
pub fn generate_connector_path(start: Point, end: Point) -> String {
    route_connector(start, end).to_string()
}

fn curved_body(start: Point, end: Point) -> Vec<PathCommand> {
    let offset = (end.x - start.x).abs() * 0.5;
    vec![
        PathCommand::MoveTo(start),
        PathCommand::Cubic {
            ctrl1: Point::new(start.x + offset, start.y),
            ctrl2: Point::new(end.x - offset, end.y),
            to: end,
        },
    ]
}

fn orthogonal_body(start: Point, end: Point) -> Vec<PathCommand> {
    // +1 routes below the source node, -1 above it
    let dir: f32 = if end.y > start.y { 1.0 } else { -1.0 };
    let clearance = NODE_HALF_HEIGHT + SAFE_AREA;
    // Target closer than the lane: the destination column turns back toward it.
    let interrupt = (end.y - start.y) * dir < clearance;
    let turn = if interrupt { -CORNER_RADIUS } else { CORNER_RADIUS };

    let exit_x = start.x + SAFE_AREA;
    let entry_x = end.x - SAFE_AREA;
    let lane_y = start.y + dir * clearance;

    vec![
        PathCommand::MoveTo(start),
        PathCommand::Horizontal(exit_x - CORNER_RADIUS),
        PathCommand::Quadratic {
            ctrl: Point::new(exit_x, start.y),
            to: Point::new(exit_x, start.y + dir * CORNER_RADIUS),
        },
        PathCommand::Vertical(lane_y - dir * CORNER_RADIUS),
        PathCommand::Quadratic {
            ctrl: Point::new(exit_x, lane_y),
            to: Point::new(exit_x - CORNER_RADIUS, lane_y),
        },
        PathCommand::Horizontal(entry_x + CORNER_RADIUS),
        PathCommand::Quadratic {
            ctrl: Point::new(entry_x, lane_y),
            to: Point::new(entry_x, lane_y + dir * turn),
        },
        PathCommand::Vertical(end.y - dir * turn),
        PathCommand::Quadratic {
            ctrl: Point::new(entry_x, end.y),
            to: Point::new(entry_x + CORNER_RADIUS, end.y),
        },
        PathCommand::Horizontal(end.x),
    ]
}

fn arrowhead(end: Point) -> [PathCommand; 3] {
    [
        PathCommand::LineTo(Point::new(end.x - ARROW_SIZE, end.y - ARROW_SIZE)),
        PathCommand::MoveTo(end),
        PathCommand::LineTo(Point::new(end.x - ARROW_SIZE, end.y + ARROW_SIZE)),
    ]
}
