//! The display core: live entities, the frame clock and layer compositing.
//!
//! Each call to [`SimulationSurface::tick`] runs one frame:
//!
//! 1. refresh the bounds from the drawable size
//! 2. advance every rocket, collecting the particles they emit
//! 3. drop exploded rockets
//! 4. merge pending particles, then move, expire and draw every particle
//! 5. drop expired particles
//! 6. composite background, trail layer and particle layer into the frame
//! 7. fade the trail layer
//! 8. advance the tick counter
//!
//! New particles never enter the live list while it is being walked. Rockets
//! and the host push into a pending list that is merged once per frame, so
//! every live particle gets exactly one physics update per tick.

use crate::background::{self, BackgroundStyle};
use crate::context::{Bounds, SimContext};
use crate::error::Result;
use crate::factory::EffectKind;
use crate::layer::Layer;
use crate::particle::Particle;
use crate::random::{int_inclusive, uniform};
use crate::rocket::Rocket;
use crate::vector::Vector2D;

/// Range of the per-tick trail layer opacity.
pub const TRAIL_FADE_MIN: f32 = 0.85;
pub const TRAIL_FADE_MAX: f32 = 0.95;

/// Rockets launch from the inner 80% of the width.
const LAUNCH_MARGIN: f64 = 0.1;

pub struct SimulationSurface {
    particles: Vec<Particle>,
    rockets: Vec<Rocket>,
    pending: Vec<Particle>,
    tick: u64,
    bounds: Bounds,
    style: BackgroundStyle,
    background: Layer,
    trails: Layer,
    sprites: Layer,
    frame: Layer,
}

impl SimulationSurface {
    pub fn new(width: usize, height: usize, style: BackgroundStyle) -> Result<Self> {
        let background = background::paint(width, height, style)?;
        let frame = Layer::filled(width, height, style.color)?;
        log::info!("created {width}x{height} display surface");

        Ok(Self {
            particles: Vec::with_capacity(4096),
            rockets: Vec::new(),
            pending: Vec::new(),
            tick: 0,
            bounds: Bounds::new(width as f64, height as f64),
            style,
            background,
            trails: Layer::new(width, height)?,
            sprites: Layer::new(width, height)?,
            frame,
        })
    }

    /// Recreates the drawing layers when the logical size changes. Live
    /// particles and rockets are kept; the trail history is lost.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width == self.frame.width() && height == self.frame.height() {
            return Ok(());
        }

        let background = background::paint(width, height, self.style)?;
        let trails = Layer::new(width, height)?;
        let sprites = Layer::new(width, height)?;
        let frame = Layer::filled(width, height, self.style.color)?;

        self.background = background;
        self.trails = trails;
        self.sprites = sprites;
        self.frame = frame;
        self.bounds = Bounds::new(width as f64, height as f64);
        log::info!("resized display surface to {width}x{height}");
        Ok(())
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn context(&self) -> SimContext {
        SimContext::new(self.tick, self.bounds)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Particles queued for the next tick.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// The most recently composited frame.
    pub fn frame(&self) -> &Layer {
        &self.frame
    }

    pub fn trail_layer(&self) -> &Layer {
        &self.trails
    }

    /// Fires a rocket from a random point on the bottom edge.
    pub fn spawn_rocket(&mut self) {
        let width = self.bounds.width;
        let x = int_inclusive(
            (width * LAUNCH_MARGIN) as i32,
            (width * (1.0 - LAUNCH_MARGIN)) as i32,
        ) as f64;
        self.add_rocket(Rocket::new(x, self.bounds.height));
    }

    pub fn add_rocket(&mut self, rocket: Rocket) {
        log::debug!(
            "rocket launched at x={:.0} (fuse {}, volatile {})",
            rocket.position().x,
            rocket.lifetime(),
            rocket.is_volatile()
        );
        self.rockets.push(rocket);
    }

    /// Generates an effect at `(x, y)` and queues it for the next tick.
    pub fn inject_particles(&mut self, kind: EffectKind, x: f64, y: f64) {
        if !(0.0..=self.bounds.width).contains(&x) || !(0.0..=self.bounds.height).contains(&y) {
            log::debug!("ignoring {kind:?} injection outside bounds at ({x:.0}, {y:.0})");
            return;
        }
        let batch = kind.generate(Vector2D::new(x, y), &self.context());
        self.inject_batch(batch);
    }

    /// Queues externally generated particles for the next tick.
    pub fn inject_batch(&mut self, batch: Vec<Particle>) {
        self.pending.extend(batch);
    }

    /// Runs one frame and returns the composited image.
    pub fn tick(&mut self) -> &Layer {
        self.bounds = Bounds::new(self.frame.width() as f64, self.frame.height() as f64);
        let ctx = self.context();

        let mut outbox = std::mem::take(&mut self.pending);
        for rocket in &mut self.rockets {
            rocket.advance(&ctx, &mut outbox);
        }
        self.rockets.retain(Rocket::is_alive);
        self.particles.append(&mut outbox);
        // hand the emptied buffer back to keep its capacity
        self.pending = outbox;

        self.sprites.clear();
        let sprites = &mut self.sprites;
        let trails = &mut self.trails;
        self.particles.retain_mut(|p| {
            p.update_physics(ctx.bounds);
            if p.is_expired(ctx.tick) {
                return false;
            }
            p.render(sprites, ctx.tick);
            p.render_trail(trails);
            true
        });

        self.frame.copy_from(&self.background);
        self.frame.composite(&self.trails, 1.0);
        self.frame.composite(&self.sprites, 1.0);

        fade_trails(&mut self.trails);

        log::trace!(
            "tick {}: {} particles, {} rockets",
            self.tick,
            self.particles.len(),
            self.rockets.len()
        );
        self.tick += 1;
        &self.frame
    }
}

/// Fades the trail layer by a random opacity in
/// `TRAIL_FADE_MIN..TRAIL_FADE_MAX` and returns the opacity used.
pub fn fade_trails(trails: &mut Layer) -> f32 {
    let opacity = uniform(TRAIL_FADE_MIN as f64, TRAIL_FADE_MAX as f64) as f32;
    trails.fade(opacity);
    opacity
}
