use glam::Vec2;

// ── Points and rectangles in canvas units ──────────────────────────────────

/// Canvas position; distance and lerp come from glam.
pub type Point = Vec2;

/// Rotates `p` around `origin` by `degrees`, counter-clockwise on screen.
pub fn rotate_around(p: Point, origin: Point, degrees: f32) -> Point {
    // Screen y grows downward, so a visual counter-clockwise turn is a
    // negative angle in glam's y-up convention.
    origin + Vec2::from_angle(-degrees.to_radians()).rotate(p - origin)
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center: Point, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Half-open containment, like a pixel grid: the right and bottom edges
    /// are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Bounding box of a `w`×`h` box rotated by `degrees` about its center.
    pub fn rotated_bounds(center: Point, w: f32, h: f32, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let bw = (w * cos).abs() + (h * sin).abs();
        let bh = (w * sin).abs() + (h * cos).abs();
        Self::centered(center, bw, bh)
    }
}

/// Points along `a`→`b` spaced at most `spacing` apart, both ends included.
pub fn sample_segment(a: Point, b: Point, spacing: f32) -> Vec<Point> {
    let len = a.distance(b);
    let steps = if spacing > 0.0 {
        (len / spacing).ceil().max(1.0) as usize
    } else {
        1
    };
    (0..=steps)
        .map(|i| a.lerp(b, i as f32 / steps as f32))
        .collect()
}
