use crate::context::{Bounds, SimContext};
use crate::factory;
use crate::particle::Particle;
use crate::random::{chance, int_inclusive, uniform};
use crate::vector::Vector2D;

/// Rockets explode once they climb above this fraction of the height.
const CEILING: f64 = 0.33;

/// Chance that a rocket wobbles wildly on its way up.
const VOLATILE_CHANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RocketPhase {
    /// Fired but not yet moved. Lasts exactly one advance.
    Launching,
    Ascending,
    /// Terminal. The explosion has been emitted.
    Exploded,
}

#[derive(Debug, Clone)]
pub struct Rocket {
    position: Vector2D,
    velocity: Vector2D,
    lifetime: u32,
    phase: RocketPhase,
    volatile: bool,
}

impl Rocket {
    /// A rocket fired straight up from `(x, y)` with random speed and fuse.
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_params(
            Vector2D::new(x, y),
            Vector2D::new(0.0, int_inclusive(-7, -4) as f64),
            int_inclusive(150, 200) as u32,
            chance(VOLATILE_CHANCE),
        )
    }

    pub fn with_params(position: Vector2D, velocity: Vector2D, lifetime: u32, volatile: bool) -> Self {
        Self {
            position,
            velocity,
            lifetime,
            phase: RocketPhase::Launching,
            volatile,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    pub fn phase(&self) -> RocketPhase {
        self.phase
    }

    pub fn is_volatile(&self) -> bool {
        self.volatile
    }

    pub fn is_alive(&self) -> bool {
        self.phase != RocketPhase::Exploded
    }

    /// Advances one tick, pushing any particles the rocket emits into `outbox`.
    /// Calling this on an exploded rocket does nothing.
    pub fn advance(&mut self, ctx: &SimContext, outbox: &mut Vec<Particle>) {
        match self.phase {
            RocketPhase::Exploded => return,
            RocketPhase::Launching => {
                outbox.extend(factory::launch_sparks(self.position, ctx));
                self.phase = RocketPhase::Ascending;
            }
            RocketPhase::Ascending if self.in_flight(ctx.bounds) => {
                self.position.add(self.velocity);
                let wobble = if self.volatile { 25.0 } else { 4.5 };
                self.velocity.rotate(uniform(-wobble, wobble));
                outbox.extend(factory::trail_sparks(self.position, ctx));
            }
            RocketPhase::Ascending => {
                let burst = factory::explosion_parts(self.position, ctx);
                log::debug!(
                    "rocket exploded at ({:.0}, {:.0}) tick {}: {} kickoff + {} bloom particles",
                    self.position.x,
                    self.position.y,
                    ctx.tick,
                    burst.kickoff.len(),
                    burst.bloom.len()
                );
                outbox.extend(burst.into_particles());
                self.phase = RocketPhase::Exploded;
            }
        }

        self.lifetime = self.lifetime.saturating_sub(1);
    }

    fn in_flight(&self, bounds: Bounds) -> bool {
        let Vector2D { x, y } = self.position;
        self.lifetime > 0
            && y <= bounds.height
            && y >= bounds.height * CEILING
            && x > 1.0
            && x < bounds.width - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(tick: u64) -> SimContext {
        SimContext::new(tick, Bounds::new(1024.0, 768.0))
    }

    fn originals(batch: &[Particle]) -> usize {
        batch.iter().filter(|p| !p.is_split()).count()
    }

    #[test]
    fn test_new_rocket_ranges() {
        fastrand::seed(20);
        for _ in 0..100 {
            let r = Rocket::new(500.0, 768.0);
            assert!((150..=200).contains(&r.lifetime()));
            assert!((-7.0..=-4.0).contains(&r.velocity().y));
            assert_eq!(r.velocity().x, 0.0);
            assert_eq!(r.phase(), RocketPhase::Launching);
        }
    }

    #[test]
    fn test_launch_tick_emits_sparks_without_moving() {
        fastrand::seed(21);
        let mut r = Rocket::new(500.0, 768.0);
        let mut outbox = Vec::new();
        r.advance(&ctx(1), &mut outbox);

        assert!((6..=18).contains(&originals(&outbox)));
        assert_eq!(r.position(), Vector2D::new(500.0, 768.0));
        assert_eq!(r.phase(), RocketPhase::Ascending);
        assert!(r.is_alive());
    }

    #[test]
    fn test_ascent_moves_and_leaves_trail() {
        fastrand::seed(22);
        let mut r = Rocket::with_params(Vector2D::new(500.0, 700.0), Vector2D::new(0.0, -5.0), 100, false);
        let mut outbox = Vec::new();
        r.advance(&ctx(0), &mut outbox);
        outbox.clear();

        r.advance(&ctx(1), &mut outbox);
        assert_eq!(r.position(), Vector2D::new(500.0, 695.0));
        assert!((6..=18).contains(&originals(&outbox)));
        // heading jitter stays within 4.5 degrees of straight up
        let heading = r.velocity().angle_deg();
        assert!((heading + 90.0).abs() <= 4.5 + 1e-9, "heading {heading}");
        assert_eq!(r.lifetime(), 98);
    }

    #[test]
    fn test_explodes_when_fuse_runs_out() {
        fastrand::seed(23);
        let mut r = Rocket::with_params(Vector2D::new(500.0, 700.0), Vector2D::new(0.0, -1.0), 3, false);
        let mut outbox = Vec::new();
        let mut ticks = 0;
        while r.is_alive() {
            outbox.clear();
            r.advance(&ctx(ticks), &mut outbox);
            ticks += 1;
        }
        // launch, two ascent ticks, then the explosion
        assert_eq!(ticks, 4);
        assert!(originals(&outbox) >= 250);
        assert_eq!(r.phase(), RocketPhase::Exploded);
    }

    #[test]
    fn test_explodes_near_ceiling() {
        fastrand::seed(24);
        let mut r = Rocket::with_params(Vector2D::new(500.0, 250.0), Vector2D::new(0.0, -5.0), 150, false);
        let mut outbox = Vec::new();
        r.advance(&ctx(0), &mut outbox);
        outbox.clear();
        // 250 is above 768 * 0.33, so the first ascent tick detonates
        r.advance(&ctx(1), &mut outbox);
        assert!(!r.is_alive());
        assert_eq!(r.position(), Vector2D::new(500.0, 250.0));
    }

    #[test]
    fn test_explodes_at_side_edge() {
        fastrand::seed(25);
        let mut r = Rocket::with_params(Vector2D::new(1.0, 600.0), Vector2D::new(0.0, -5.0), 150, false);
        let mut outbox = Vec::new();
        r.advance(&ctx(0), &mut outbox);
        r.advance(&ctx(1), &mut outbox);
        assert!(!r.is_alive());
    }

    #[test]
    fn test_exploded_rocket_is_inert() {
        fastrand::seed(26);
        let mut r = Rocket::with_params(Vector2D::new(500.0, 700.0), Vector2D::new(0.0, -5.0), 0, false);
        let mut outbox = Vec::new();
        r.advance(&ctx(0), &mut outbox);
        r.advance(&ctx(1), &mut outbox);
        assert!(!r.is_alive());

        let before = r.position();
        outbox.clear();
        for tick in 2..10 {
            r.advance(&ctx(tick), &mut outbox);
        }
        assert!(outbox.is_empty());
        assert_eq!(r.phase(), RocketPhase::Exploded);
        assert_eq!(r.position(), before);
    }

    #[test]
    fn test_volatile_rocket_wobbles_wider() {
        fastrand::seed(27);
        let mut widest: f64 = 0.0;
        for _ in 0..200 {
            let mut r = Rocket::with_params(Vector2D::new(500.0, 700.0), Vector2D::new(0.0, -5.0), 100, true);
            let mut outbox = Vec::new();
            r.advance(&ctx(0), &mut outbox);
            r.advance(&ctx(1), &mut outbox);
            let deviation = (r.velocity().angle_deg() + 90.0).abs();
            assert!(deviation <= 25.0 + 1e-9);
            widest = widest.max(deviation);
        }
        assert!(widest > 4.5);
    }
}
