use termfireworks::background::BackgroundStyle;
use termfireworks::factory::{self, EffectKind};
use termfireworks::layer::Layer;
use termfireworks::surface::{TRAIL_FADE_MAX, TRAIL_FADE_MIN, fade_trails};
use termfireworks::{
    Bounds, Decoration, Particle, Rocket, RocketPhase, SimContext, SimulationSurface, Vector2D,
};

fn originals(batch: &[Particle]) -> usize {
    batch.iter().filter(|p| !p.is_split()).count()
}

#[test]
fn explosion_batch_size_and_bloom_lifetimes() {
    fastrand::seed(0xF1DE);
    let ctx = SimContext::new(0, Bounds::new(1024.0, 768.0));
    for _ in 0..25 {
        let burst = factory::explosion_parts(Vector2D::new(100.0, 200.0), &ctx);
        let base = originals(&burst.kickoff) + originals(&burst.bloom);
        assert!((250..=650).contains(&base), "base size {base}");
        assert!(burst.len() >= base);

        for p in burst.bloom.iter().filter(|p| !p.is_split()) {
            assert!((20..=55).contains(&p.lifetime()), "lifetime {}", p.lifetime());
        }
        let flat = factory::explosion(Vector2D::new(100.0, 200.0), &ctx);
        assert!(originals(&flat) >= 250);
    }
}

#[test]
fn rocket_launch_tick() {
    fastrand::seed(0xB00);
    let ctx = SimContext::new(1, Bounds::new(1024.0, 768.0));
    let mut rocket = Rocket::new(500.0, 768.0);
    let mut outbox = Vec::new();
    rocket.advance(&ctx, &mut outbox);

    assert!((6..=18).contains(&originals(&outbox)));
    assert_eq!(rocket.position(), Vector2D::new(500.0, 768.0));
    assert_eq!(rocket.phase(), RocketPhase::Ascending);
}

#[test]
fn rocket_explodes_exactly_once() {
    fastrand::seed(0xB01);
    let bounds = Bounds::new(1024.0, 768.0);
    let mut rocket = Rocket::new(500.0, 768.0);
    let mut explosions = 0;
    for tick in 0..400 {
        let mut outbox = Vec::new();
        let was_alive = rocket.is_alive();
        rocket.advance(&SimContext::new(tick, bounds), &mut outbox);
        if was_alive && !rocket.is_alive() {
            explosions += 1;
            assert!(originals(&outbox) >= 250);
        }
        if !was_alive {
            assert!(outbox.is_empty());
            assert_eq!(rocket.phase(), RocketPhase::Exploded);
        }
    }
    assert_eq!(explosions, 1);
}

#[test]
fn trail_fade_is_monotonic() {
    fastrand::seed(0xFADE);
    for _ in 0..20 {
        let mut once = Layer::new(64, 64).unwrap();
        for i in 0..64 {
            once.draw_line(0, i, 63, 63 - i, (255, 200, 100), 51);
        }
        let mut twice = Layer::new(64, 64).unwrap();
        twice.copy_from(&once);
        let initial = once.total_opacity();

        let a = fade_trails(&mut once);
        assert!((TRAIL_FADE_MIN..=TRAIL_FADE_MAX).contains(&a));
        fade_trails(&mut twice);
        fade_trails(&mut twice);

        assert!(once.total_opacity() < initial);
        assert!(twice.total_opacity() < once.total_opacity());
    }
}

#[test]
fn expiry_is_one_way() {
    let mut p = Particle::new(Vector2D::new(5.0, 5.0), Vector2D::ZERO, (255, 255, 255), 20, 100);
    for tick in 100..120 {
        assert!(!p.is_expired(tick));
    }
    for tick in 120..200 {
        assert!(p.is_expired(tick));
        assert!(!p.is_alive());
    }
}

#[test]
fn every_live_particle_moves_every_tick() {
    fastrand::seed(0x5EED);
    let mut surface = SimulationSurface::new(400, 300, BackgroundStyle::default()).unwrap();

    let tracked: Vec<Particle> = (0..50)
        .map(|i| {
            Particle::new(
                Vector2D::new(10.0, 20.0 + i as f64 * 5.0),
                Vector2D::new(2.0, 0.0),
                (255, 255, 255),
                60,
                0,
            )
            .with_decoration(Decoration {
                gravity: false,
                jitter: false,
                ..Decoration::default()
            })
        })
        .collect();
    surface.inject_batch(tracked);
    surface.tick();

    for tick in 0..40 {
        let before: Vec<Vector2D> = surface.particles()[..50].iter().map(|p| p.position()).collect();

        // spawn work that lands in the live list during this frame
        if tick % 5 == 0 {
            surface.spawn_rocket();
        }
        surface.inject_particles(EffectKind::TrailSparks, 200.0, 150.0);
        surface.tick();

        for (p, old) in surface.particles()[..50].iter().zip(&before) {
            assert!(p.position().x > old.x, "particle skipped an update");
        }
    }
}

#[test]
fn frame_composites_layers_in_order() {
    let mut surface = SimulationSurface::new(
        64,
        64,
        BackgroundStyle {
            color: (0, 0, 40),
            haze: false,
        },
    )
    .unwrap();
    let p = Particle::new(Vector2D::new(10.0, 10.0), Vector2D::new(20.0, 0.0), (255, 0, 0), 5, 0)
        .with_decoration(Decoration {
            gravity: false,
            jitter: false,
            trail_color: Some((0, 255, 0)),
            ..Decoration::default()
        });
    surface.inject_batch(vec![p]);
    let frame = surface.tick();

    // the particle sits on top of its own trail
    assert_eq!(frame.rgb_at(30, 10), (255, 0, 0));
    // trail between old and new position, blended over the background
    let (r, g, b) = frame.rgb_at(20, 10);
    assert_eq!(r, 0);
    assert!(g > 0 && g < 255);
    assert!(b > 0 && b < 40);
    // untouched background
    assert_eq!(frame.rgb_at(50, 50), (0, 0, 40));
}
