//! Fireworks simulation and rendering core.
//!
//! Rockets launch from the bottom of a [`SimulationSurface`](surface::SimulationSurface),
//! climb while shedding sparks, and burst into coloured particles that fade
//! out leaving light trails. The surface owns every live entity and composites
//! three layers per frame: a static background, a slowly fading trail layer
//! and a freshly drawn particle layer.
//!
//! The terminal front end lives in [`terminal`]; the binary wires it to the
//! terminal event loop.

pub mod background;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod layer;
pub mod particle;
pub mod random;
pub mod rocket;
pub mod surface;
pub mod terminal;
pub mod vector;

pub use context::{Bounds, SimContext};
pub use error::{FireworksError, Result};
pub use factory::EffectKind;
pub use particle::{Decoration, Flicker, Particle};
pub use rocket::{Rocket, RocketPhase};
pub use surface::SimulationSurface;
pub use vector::Vector2D;
