//! Particle recipes for each firework effect.
//!
//! Every recipe is a plain function returning a fresh batch of particles born
//! on the current tick at the given origin. Nothing here keeps state between
//! calls; all variety comes from the random ranges below.

use crate::color::{Rgb, WHITE, brighter, darker, firework_color, spark_color};
use crate::context::SimContext;
use crate::particle::{Decoration, Flicker, Particle};
use crate::random::{chance, int_inclusive, uniform};
use crate::vector::Vector2D;

/// Effects that can be injected at a point by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Wide fan of fast sparks, as when a rocket is fired.
    ShotSparks,
    /// Small puff of sparks, as left behind by an ascending rocket.
    TrailSparks,
    /// Full two-colour firework explosion.
    Explosion,
}

impl EffectKind {
    pub fn generate(self, origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
        match self {
            EffectKind::ShotSparks => shot_sparks(origin, ctx),
            EffectKind::TrailSparks => trail_sparks(origin, ctx),
            EffectKind::Explosion => explosion(origin, ctx),
        }
    }
}

/// The two halves of an explosion.
pub struct ExplosionBurst {
    /// Spark-coloured particles thrown out first.
    pub kickoff: Vec<Particle>,
    /// The coloured shell.
    pub bloom: Vec<Particle>,
}

impl ExplosionBurst {
    pub fn len(&self) -> usize {
        self.kickoff.len() + self.bloom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kickoff.is_empty() && self.bloom.is_empty()
    }

    pub fn into_particles(self) -> Vec<Particle> {
        let mut particles = self.kickoff;
        particles.extend(self.bloom);
        particles
    }
}

/// Burst emitted on a rocket's launch tick.
pub fn launch_sparks(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    spark_burst(origin, ctx)
}

/// Burst emitted every tick while a rocket ascends.
pub fn trail_sparks(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    spark_burst(origin, ctx)
}

/// Launch and ascent share one look: a small, slow puff of orange sparks.
fn spark_burst(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    let count = int_inclusive(6, 18) as usize;
    let color = spark_color();
    let mut particles = Vec::with_capacity(count + count / 10 + 1);

    for _ in 0..count {
        let mut p = Particle::new(
            origin,
            Vector2D::new(uniform(0.0, 0.25), 0.0),
            color,
            int_inclusive(1, 12) as u64,
            ctx.tick,
        )
        .with_decoration(Decoration {
            glow: true,
            glow_radius: 0,
            flicker: flicker(int_inclusive(0, 15), darker(color)),
            trailing: chance(0.5),
            trail_color: Some(color),
            gravity: true,
            ..Decoration::default()
        });
        p.velocity_mut().rotate(int_inclusive(0, 360) as f64);

        push_maybe_split(&mut particles, p, 0.05);
    }
    particles
}

/// Fan of fast sparks thrown into the 215..=325 degree cone.
pub fn shot_sparks(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    let count = int_inclusive(150, 250) as usize;
    let mut particles = Vec::with_capacity(count + count / 10);

    for _ in 0..count {
        let color = spark_color();
        let mut p = Particle::new(
            origin,
            Vector2D::new(uniform(0.0, 6.0), 0.0),
            color,
            int_inclusive(6, 24) as u64,
            ctx.tick,
        )
        .with_decoration(Decoration {
            glow: true,
            glow_radius: 0,
            flicker: flicker(int_inclusive(0, 15), darker(color)),
            trailing: chance(0.5),
            trail_color: Some(color),
            gravity: false,
            ..Decoration::default()
        });
        p.velocity_mut().rotate(int_inclusive(180 + 35, 360 - 35) as f64);

        push_maybe_split(&mut particles, p, 0.05);
    }
    particles
}

/// Kickoff sparks followed by the two-coloured bloom, flattened.
pub fn explosion(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    explosion_parts(origin, ctx).into_particles()
}

pub fn explosion_parts(origin: Vector2D, ctx: &SimContext) -> ExplosionBurst {
    ExplosionBurst {
        kickoff: kickoff_sparks(origin, ctx),
        bloom: bloom(origin, ctx),
    }
}

fn kickoff_sparks(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    let count = int_inclusive(50, 150) as usize;
    let mut particles = Vec::with_capacity(count + count / 10);

    for _ in 0..count {
        let color = spark_color();
        let flicker_color = if chance(0.1) { WHITE } else { brighter(color) };
        let mut p = Particle::new(
            origin,
            Vector2D::new(uniform(-1.0, 1.0), uniform(-1.6, -1.0)),
            color,
            int_inclusive(2, 25) as u64,
            ctx.tick,
        )
        .with_decoration(Decoration {
            glow: true,
            glow_radius: 2,
            flicker: flicker(int_inclusive(0, 15), flicker_color),
            trail_color: Some(color),
            gravity: false,
            ..Decoration::default()
        });
        p.velocity_mut().rotate(int_inclusive(0, 360) as f64);

        push_maybe_split(&mut particles, p, 0.05);
    }
    particles
}

fn bloom(origin: Vector2D, ctx: &SimContext) -> Vec<Particle> {
    let count = int_inclusive(200, 500) as usize;
    let widen = int_inclusive(0, 45);
    let primary = firework_color();
    let secondary = firework_color();
    // one in four shells bursts upwards instead of in a sphere
    let directional = chance(0.25);

    let mut particles = Vec::with_capacity(count + count / 5);
    for _ in 0..count {
        let color = if chance(0.5) { primary } else { secondary };
        let speed = if directional {
            uniform(4.0, 12.0)
        } else {
            uniform(1.0, 8.0)
        };
        let flicker_color = if chance(0.25) {
            brighter(firework_color())
        } else {
            darker(primary)
        };

        let mut p = Particle::new(
            origin,
            Vector2D::new(speed, 0.0),
            color,
            int_inclusive(20, 55) as u64,
            ctx.tick,
        )
        .with_decoration(Decoration {
            glow: true,
            glow_radius: int_inclusive(2, 5) as u32,
            flicker: flicker(int_inclusive(3, 22), flicker_color),
            trail_color: Some(primary),
            ..Decoration::default()
        });

        let angle = if directional {
            int_inclusive(180 - widen, 360 + widen)
        } else {
            int_inclusive(0, 360)
        };
        p.velocity_mut().rotate(angle as f64);

        push_maybe_split(&mut particles, p, 0.10);
    }
    particles
}

fn flicker(rate: i32, color: Rgb) -> Option<Flicker> {
    (rate > 0).then_some(Flicker {
        rate: rate as u32,
        color,
    })
}

/// Pushes `p`, preceded by a split copy with probability `split_chance`.
fn push_maybe_split(particles: &mut Vec<Particle>, p: Particle, split_chance: f64) {
    if chance(split_chance) {
        particles.push(p.clone_as_split());
    }
    particles.push(p);
}
