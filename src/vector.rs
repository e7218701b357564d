//! 2D vector value type used for positions and velocities.

use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&mut self, v: Vector2D) {
        self.x += v.x;
        self.y += v.y;
    }

    pub fn add_xy(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Multiplies both components by `factor` and returns a detached copy of
    /// the scaled vector.
    pub fn scale(&mut self, factor: f64) -> Vector2D {
        self.x *= factor;
        self.y *= factor;
        *self
    }

    /// Rotates by `deg` degrees (positive is clockwise on a y-down screen).
    pub fn rotate(&mut self, deg: f64) {
        self.rotate_rad(deg.to_radians());
    }

    pub fn rotate_rad(&mut self, rad: f64) {
        let (sin, cos) = rad.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = x;
        self.y = y;
    }

    pub fn reverse_x(&mut self) {
        self.x = -self.x;
    }

    pub fn reverse_y(&mut self) {
        self.y = -self.y;
    }

    pub fn reverse(&mut self) {
        self.reverse_x();
        self.reverse_y();
    }

    pub fn angle_rad(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_rad().to_degrees()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        Vector2D::add(self, rhs);
    }
}
