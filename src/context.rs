/// Drawable area of the display in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Read-only view of the display handed to particles, rockets and effect
/// recipes while they advance. It replaces any back-reference to the owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimContext {
    pub tick: u64,
    pub bounds: Bounds,
}

impl SimContext {
    pub fn new(tick: u64, bounds: Bounds) -> Self {
        Self { tick, bounds }
    }
}
