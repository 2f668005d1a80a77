//! Pure geometry helpers for hit-testing and resize math.

use kurbo::{Point, Rect, Vec2};

/// Hit radius around a resize handle anchor, in canvas units.
pub const HANDLE_RADIUS: f64 = 8.0;

/// Minimum element dimension enforced by resizing.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

/// One of the eight resize handles around a selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    /// Anchor position of this handle on a box (corner or edge midpoint).
    pub fn anchor(self, b: Rect) -> Point {
        let cx = (b.x0 + b.x1) / 2.0;
        let cy = (b.y0 + b.y1) / 2.0;
        match self {
            ResizeHandle::NorthWest => Point::new(b.x0, b.y0),
            ResizeHandle::North => Point::new(cx, b.y0),
            ResizeHandle::NorthEast => Point::new(b.x1, b.y0),
            ResizeHandle::East => Point::new(b.x1, cy),
            ResizeHandle::SouthEast => Point::new(b.x1, b.y1),
            ResizeHandle::South => Point::new(cx, b.y1),
            ResizeHandle::SouthWest => Point::new(b.x0, b.y1),
            ResizeHandle::West => Point::new(b.x0, cy),
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest
        )
    }

    fn moves_right_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast
        )
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast
        )
    }
}

/// Inclusive AABB containment test.
pub fn point_in_box(p: Point, b: Rect) -> bool {
    p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1
}

/// Find the resize handle under a point, if any.
pub fn resize_handle_at(p: Point, b: Rect) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .iter()
        .copied()
        .find(|h| (p - h.anchor(b)).hypot() <= HANDLE_RADIUS)
}

/// Apply a resize delta to a box via the given handle.
///
/// Edges not owned by the handle stay fixed. Width and height are clamped
/// to [`MIN_ELEMENT_SIZE`]; when the clamp triggers on a near-side handle
/// (w/nw/sw for width, n/nw/ne for height) the position is recomputed so
/// the far edge does not move.
pub fn apply_resize(initial: Rect, delta: Vec2, handle: ResizeHandle) -> Rect {
    let mut x = initial.x0;
    let mut y = initial.y0;
    let mut w = initial.width();
    let mut h = initial.height();

    if handle.moves_left_edge() {
        x += delta.x;
        w -= delta.x;
    }
    if handle.moves_right_edge() {
        w += delta.x;
    }
    if handle.moves_top_edge() {
        y += delta.y;
        h -= delta.y;
    }
    if handle.moves_bottom_edge() {
        h += delta.y;
    }

    if w < MIN_ELEMENT_SIZE {
        w = MIN_ELEMENT_SIZE;
        if handle.moves_left_edge() {
            x = initial.x1 - MIN_ELEMENT_SIZE;
        }
    }
    if h < MIN_ELEMENT_SIZE {
        h = MIN_ELEMENT_SIZE;
        if handle.moves_top_edge() {
            y = initial.y1 - MIN_ELEMENT_SIZE;
        }
    }

    Rect::new(x, y, x + w, y + h)
}

/// Projection-clamped distance from a point to the segment a-b.
pub fn distance_point_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Min/max bounding box of a point set, inflated by `padding` on all sides.
///
/// Returns a zero rect for an empty slice.
pub fn bounding_box_of_points(points: &[Point], padding: f64) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x, max_y).inflate(padding, padding)
}
