/// Axis-aligned box tests between entities.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Bounds { x, y, w, h }
    }
}

/// True when the boxes overlap horizontally and their *upper halves*
/// overlap vertically.  An arrow has to meet the top half of a balloon.
///
/// All four comparisons are strict: touching edges do not collide.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.x + a.w > b.x
        && a.x < b.x + b.w
        && a.y + a.h / 2.0 > b.y
        && a.y < b.y + b.h / 2.0
}
