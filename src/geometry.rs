//! Points, node geometry and port proximity scanning.

use std::ops::{Add, Sub};

/// A position in canvas (or screen) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Geometry of a node box with a single input port on the left edge and a
/// single output port on the right edge, both vertically centered.
pub trait NodeGeometry {
    fn rect(&self) -> (f32, f32, f32, f32); // x, y, width, height

    /// Input ("socket") point: left edge, half height.
    fn input_port(&self) -> Point {
        let (x, y, _, h) = self.rect();
        Point::new(x, y + h / 2.0)
    }

    /// Output point where outgoing cables start: right edge, half height.
    fn output_port(&self) -> Point {
        let (x, y, w, h) = self.rect();
        Point::new(x + w, y + h / 2.0)
    }
}

/// Find the first node, in iteration order, whose input port lies strictly
/// within `radius` of `cursor`.
///
/// `exclude` filters out the node the scan is performed for, so a cable can
/// never snap back onto its own node. When several ports are in range the
/// earliest node wins, not the nearest.
pub fn find_port_near<'a, N, I, F>(cursor: Point, nodes: I, exclude: F, radius: f32) -> Option<&'a N>
where
    N: NodeGeometry + 'a,
    I: IntoIterator<Item = &'a N>,
    F: Fn(&N) -> bool,
{
    nodes
        .into_iter()
        .find(|node| !exclude(node) && node.input_port().distance_to(cursor) < radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Boxed {
        id: u32,
        x: f32,
        y: f32,
    }

    impl NodeGeometry for Boxed {
        fn rect(&self) -> (f32, f32, f32, f32) {
            (self.x, self.y, 150.0, 100.0)
        }
    }

    fn boxed(id: u32, x: f32, y: f32) -> Boxed {
        Boxed { id, x, y }
    }

    // ========================================================================
    // Ports
    // ========================================================================

    #[test]
    fn test_ports_are_vertically_centered() {
        let node = boxed(1, 100.0, 200.0);
        assert_eq!(node.input_port(), Point::new(100.0, 250.0));
        assert_eq!(node.output_port(), Point::new(250.0, 250.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, -5.0);
        assert_eq!(a + b, Point::new(14.0, 15.0));
        assert_eq!(a - b, Point::new(6.0, 25.0));
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_size_center() {
        assert_eq!(Size::new(1280.0, 720.0).center(), Point::new(640.0, 360.0));
    }

    // ========================================================================
    // find_port_near()
    // ========================================================================

    #[test]
    fn test_find_port_near_hit() {
        let nodes = [boxed(1, 0.0, 0.0), boxed(2, 400.0, 0.0)];
        let found = find_port_near(Point::new(410.0, 55.0), &nodes, |n: &Boxed| n.id == 1, 30.0);
        assert_eq!(found.map(|n| n.id), Some(2));
    }

    #[test]
    fn test_find_port_near_outside_radius() {
        let nodes = [boxed(2, 400.0, 0.0)];
        let found = find_port_near(Point::new(400.0, 90.0), &nodes, |_: &Boxed| false, 30.0);
        assert!(found.is_none());
    }

    #[test]
    fn test_find_port_near_radius_is_exclusive() {
        let nodes = [boxed(2, 400.0, 0.0)];
        // Exactly 30px below the input port at (400, 50)
        let found = find_port_near(Point::new(400.0, 80.0), &nodes, |_: &Boxed| false, 30.0);
        assert!(found.is_none());
    }

    #[test]
    fn test_find_port_near_excludes_source() {
        let nodes = [boxed(1, 0.0, 0.0)];
        let found = find_port_near(Point::new(0.0, 50.0), &nodes, |n: &Boxed| n.id == 1, 30.0);
        assert!(found.is_none());
    }

    #[test]
    fn test_find_port_near_first_in_order_wins() {
        let nodes = [boxed(2, 0.0, 0.0), boxed(3, 20.0, 0.0)];
        // 18px from node 2's port, 2px from node 3's.
        let found = find_port_near(Point::new(18.0, 50.0), &nodes, |_: &Boxed| false, 30.0);
        assert_eq!(found.map(|n| n.id), Some(2));

        let reversed = [boxed(3, 20.0, 0.0), boxed(2, 0.0, 0.0)];
        let found = find_port_near(Point::new(18.0, 50.0), &reversed, |_: &Boxed| false, 30.0);
        assert_eq!(found.map(|n| n.id), Some(3));
    }

    #[test]
    fn test_find_port_near_skips_excluded_before_in_range() {
        let nodes = [boxed(1, 0.0, 0.0), boxed(2, 20.0, 0.0)];
        let found = find_port_near(Point::new(5.0, 50.0), &nodes, |n: &Boxed| n.id == 1, 30.0);
        assert_eq!(found.map(|n| n.id), Some(2));
    }

    #[test]
    fn test_find_port_near_empty() {
        let nodes: [Boxed; 0] = [];
        assert!(find_port_near(Point::new(0.0, 0.0), &nodes, |_: &Boxed| false, 30.0).is_none());
    }
}
