//! A single simulated light-point.
//!
//! Particles carry their physics state (position, velocity, lifetime) and a
//! [`Decoration`] profile that controls how they are drawn: glow rings,
//! flickering, light trails. The profile is a plain value and is copied when a
//! particle splits, so a split spark never shares state with its parent.

use crate::color::Rgb;
use crate::context::Bounds;
use crate::layer::{Layer, ring_offsets};
use crate::random::{chance, int_inclusive, uniform};
use crate::vector::Vector2D;

/// Downward pull added to the velocity every tick.
pub const GRAVITY: Vector2D = Vector2D::new(0.0, 0.122);

/// Width of the band beyond each edge in which particles bounce back.
pub const COLLISION_BAND: i64 = 500;

/// Maximum sideways kick applied to the other axis on a bounce.
const COLLISION_SPREAD: f64 = 1.5;

pub const DEFAULT_TRAIL_STRENGTH: f64 = 0.2;

/// Starting alpha of the innermost glow ring.
const GLOW_ALPHA: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flicker {
    /// Ticks between flicker re-rolls.
    pub rate: u32,
    pub color: Rgb,
}

/// Visual settings of a particle, copied by value on split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub glow: bool,
    pub glow_radius: u32,
    pub flicker: Option<Flicker>,
    pub trailing: bool,
    pub trail_color: Option<Rgb>,
    pub trail_strength: f64,
    pub gravity: bool,
    pub jitter: bool,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            glow: false,
            glow_radius: 0,
            flicker: None,
            trailing: true,
            trail_color: None,
            trail_strength: DEFAULT_TRAIL_STRENGTH,
            gravity: true,
            jitter: true,
        }
    }
}

/// Precomputed glow rings for one flicker state.
#[derive(Debug, Clone)]
struct GlowStamp {
    color: Rgb,
    pixels: Vec<(i32, i32, u8)>,
}

impl GlowStamp {
    fn build(radius: u32, color: Rgb) -> Self {
        let radius = radius as i32;
        let step = GLOW_ALPHA / radius.max(1);
        let mut alpha = GLOW_ALPHA;
        let mut pixels = Vec::new();

        for r in 1..radius {
            for (dx, dy) in ring_offsets(r) {
                pixels.push((dx, dy, alpha as u8));
            }
            alpha = (alpha - step).max(0);
        }

        Self { color, pixels }
    }
}

#[derive(Debug, Clone, Default)]
struct GlowCache {
    steady: Option<GlowStamp>,
    flickering: Option<GlowStamp>,
}

/// A light-point whose velocity only changes through [`Particle::update_physics`]
/// once it has left the recipe that built it.
///
/// ```compile_fail
/// use termfireworks::{Particle, Vector2D};
///
/// let mut p = Particle::new(Vector2D::ZERO, Vector2D::ZERO, (0, 0, 0), 10, 0);
/// p.velocity_mut().x = 5.0;
/// ```
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vector2D,
    velocity: Vector2D,
    color: Rgb,
    lifetime: u64,
    birth_tick: u64,
    alive: bool,
    decoration: Decoration,
    last_position: (i64, i64),
    flickering: bool,
    split: bool,
    glow_cache: GlowCache,
}

impl Particle {
    pub fn new(position: Vector2D, velocity: Vector2D, color: Rgb, lifetime: u64, birth_tick: u64) -> Self {
        Self {
            position,
            velocity,
            color,
            lifetime,
            birth_tick,
            alive: true,
            decoration: Decoration::default(),
            last_position: (position.x as i64, position.y as i64),
            flickering: false,
            split: false,
            glow_cache: GlowCache::default(),
        }
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.set_decoration(decoration);
        self
    }

    pub fn set_decoration(&mut self, decoration: Decoration) {
        self.decoration = decoration;
        self.glow_cache = GlowCache::default();
    }

    pub fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    /// Mutable access to the velocity, for recipes shaping a fresh particle.
    pub(crate) fn velocity_mut(&mut self) -> &mut Vector2D {
        &mut self.velocity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    pub fn birth_tick(&self) -> u64 {
        self.birth_tick
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_flickering(&self) -> bool {
        self.flickering
    }

    /// True for secondary sparks produced by [`Particle::clone_as_split`].
    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn last_position(&self) -> (i64, i64) {
        self.last_position
    }

    /// Advances one tick: bounce, move, drag, gravity, jitter.
    pub fn update_physics(&mut self, bounds: Bounds) {
        self.last_position = (self.position.x as i64, self.position.y as i64);
        self.collide(bounds);

        self.position.add(self.velocity);

        // air resistance
        self.velocity.scale(uniform(0.975, 0.985));

        if self.decoration.gravity {
            self.velocity.add(GRAVITY);
        }
        if self.decoration.jitter {
            self.velocity.add_xy(uniform(-0.2, 0.2), uniform(-0.02, 0.02));
        }
    }

    /// Bounces off the bands just outside the bounds. Each band only covers the
    /// length of its own edge, so the corners are open.
    fn collide(&mut self, bounds: Bounds) {
        let w = bounds.width as i64;
        let h = bounds.height as i64;
        let fx = (self.position.x + self.velocity.x) as i64;
        let fy = (self.position.y + self.velocity.y) as i64;

        let in_span = |v: i64, from: i64, len: i64| v >= from && v < from + len;
        let north = in_span(fx, 0, w) && in_span(fy, -COLLISION_BAND, COLLISION_BAND);
        let south = in_span(fx, 0, w) && in_span(fy, h, COLLISION_BAND);
        let west = in_span(fx, -COLLISION_BAND, COLLISION_BAND) && in_span(fy, 0, h);
        let east = in_span(fx, w, COLLISION_BAND) && in_span(fy, 0, h);

        let mut collision = false;
        if north || south {
            self.velocity.reverse_y();
            self.velocity.add_xy(uniform(-COLLISION_SPREAD, COLLISION_SPREAD), 0.0);
            collision = true;
        }
        if east || west {
            self.velocity.reverse_x();
            self.velocity.add_xy(0.0, uniform(-COLLISION_SPREAD, COLLISION_SPREAD));
            collision = true;
        }

        if collision {
            self.velocity.scale(uniform(0.7, 0.9));
            self.velocity.rotate(uniform(-15.0, 15.0));
        }
    }

    /// Marks the particle dead once its lifetime has elapsed. The transition
    /// is one-way.
    pub fn is_expired(&mut self, current_tick: u64) -> bool {
        if !self.alive {
            return true;
        }
        if current_tick.saturating_sub(self.birth_tick) >= self.lifetime {
            self.alive = false;
            return true;
        }
        false
    }

    /// Draws glow rings and the particle itself onto the particle layer.
    pub fn render(&mut self, layer: &mut Layer, current_tick: u64) {
        if !self.alive {
            return;
        }

        if let Some(flicker) = self.decoration.flicker {
            let age = current_tick.saturating_sub(self.birth_tick);
            if flicker.rate > 0 && age % flicker.rate as u64 == 0 {
                // 90% so particles born together drift out of step
                self.flickering = chance(0.9);
            }
        }

        let color = self.current_color();
        let x = self.position.x as i64;
        let y = self.position.y as i64;

        if self.decoration.glow && self.decoration.glow_radius > 1 {
            let stamp = self.glow_stamp();
            for &(dx, dy, alpha) in &stamp.pixels {
                layer.blend(x + dx as i64, y + dy as i64, stamp.color, alpha);
            }
        }

        layer.draw_point(x, y, color, 255);
    }

    /// Draws the segment travelled during the last tick onto the trail layer.
    pub fn render_trail(&self, layer: &mut Layer) {
        if !self.decoration.trailing {
            return;
        }
        let color = self.decoration.trail_color.unwrap_or(self.color);
        let alpha = (255.0 * self.decoration.trail_strength).clamp(0.0, 255.0) as u8;
        let (x0, y0) = self.last_position;
        layer.draw_line(
            x0,
            y0,
            self.position.x as i64,
            self.position.y as i64,
            color,
            alpha,
        );
    }

    /// Secondary spark: same decoration, nudged position, slower and
    /// shorter-lived.
    pub fn clone_as_split(&self) -> Particle {
        let mut position = self.position;
        position.add_xy(int_inclusive(-1, 1) as f64, int_inclusive(-1, 1) as f64);
        let mut velocity = self.velocity;
        velocity.scale(uniform(0.0, 1.25));

        let mut p = Particle::new(position, velocity, self.color, self.lifetime / 2, self.birth_tick)
            .with_decoration(self.decoration);
        p.last_position = self.last_position;
        p.split = true;
        p
    }

    fn current_color(&self) -> Rgb {
        match self.decoration.flicker {
            Some(flicker) if self.flickering => flicker.color,
            _ => self.color,
        }
    }

    fn glow_stamp(&mut self) -> &GlowStamp {
        let radius = self.decoration.glow_radius;
        let color = self.current_color();
        let slot = if self.flickering {
            &mut self.glow_cache.flickering
        } else {
            &mut self.glow_cache.steady
        };
        slot.get_or_insert_with(|| GlowStamp::build(radius, color))
    }
}
