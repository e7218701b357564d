use noise::{NoiseFn, Perlin};

use crate::color::Rgb;
use crate::error::Result;
use crate::layer::Layer;

/// Appearance of the static bottom layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStyle {
    pub color: Rgb,
    /// Faint city-light haze rising from the horizon.
    pub haze: bool,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            color: (0, 0, 0),
            haze: false,
        }
    }
}

/// Maximum brightness added by the haze at the bottom edge.
const HAZE_STRENGTH: f32 = 22.0;

/// Paints the opaque background layer.
pub fn paint(width: usize, height: usize, style: BackgroundStyle) -> Result<Layer> {
    let mut layer = Layer::filled(width, height, style.color)?;
    if !style.haze {
        return Ok(layer);
    }

    let perlin = Perlin::new(fastrand::u32(..));
    let (r, g, b) = style.color;
    for y in 0..height {
        // haze only in the lower half, strongest at the horizon
        let depth = (y as f32 / height as f32 - 0.5).max(0.0) * 2.0;
        if depth <= 0.0 {
            continue;
        }
        for x in 0..width {
            let n = perlin.get([x as f64 * 0.004, y as f64 * 0.01]) as f32;
            let lift = depth * depth * HAZE_STRENGTH * (0.6 + n * 0.4).max(0.0);
            let color = (
                (r as f32 + lift).min(255.0) as u8,
                (g as f32 + lift * 0.7).min(255.0) as u8,
                (b as f32 + lift * 0.45).min(255.0) as u8,
            );
            layer.set_pixel(x, y, color);
        }
    }
    Ok(layer)
}
