use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in canvas pixels. Containment includes the edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Top and bottom edges at two fractions of the height. Slices that
    /// share a fraction share the exact same edge.
    pub fn vertical_edges(&self, start: f64, end: f64) -> (f64, f64) {
        (self.y + start * self.height, self.y + end * self.height)
    }

    /// Horizontal slice between two fractions of the height.
    pub fn vertical_slice(&self, start: f64, end: f64) -> Rect {
        let (top, bottom) = self.vertical_edges(start, end);
        Rect::new(self.x, top, self.width, bottom - top)
    }
}

/// Vertices of a pointy-top hexagon, first vertex straight up.
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    std::array::from_fn(|i| {
        let angle = TAU / 6.0 * i as f64 - FRAC_PI_2;
        Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(520.0, 100.0, 50.0, 240.0);
        assert!(r.contains(Point::new(520.0, 100.0)));
        assert!(r.contains(Point::new(570.0, 340.0)));
        assert!(!r.contains(Point::new(570.1, 200.0)));
        assert!(!r.contains(Point::new(540.0, 99.9)));
    }

    #[test]
    fn test_vertical_slice() {
        let r = Rect::new(0.0, 100.0, 50.0, 240.0);
        assert_eq!(r.vertical_slice(0.5, 1.0), Rect::new(0.0, 220.0, 50.0, 120.0));
    }

    #[test]
    fn test_vertical_edges_are_shared() {
        let r = Rect::new(0.0, 90.0, 50.0, 17.7);
        let splits = [0.0, 0.1, 0.3, 0.7, 1.0];
        for pair in splits.windows(3) {
            let (_, upper_bottom) = r.vertical_edges(pair[0], pair[1]);
            let (lower_top, _) = r.vertical_edges(pair[1], pair[2]);
            assert_eq!(upper_bottom, lower_top);
        }
        assert_eq!(r.vertical_edges(0.7, 1.0).1, r.bottom());
    }

    #[test]
    fn test_hexagon_first_vertex_points_up() {
        let v = hexagon_vertices(Point::new(10.0, 10.0), 30.0);
        assert!((v[0].x - 10.0).abs() < 1e-9);
        assert!((v[0].y + 20.0).abs() < 1e-9);
        for p in v {
            assert!((p.distance(Point::new(10.0, 10.0)) - 30.0).abs() < 1e-9);
        }
    }
}
