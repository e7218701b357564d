//! Software drawing surfaces.
//!
//! A [`Layer`] is a premultiplied RGBA buffer with `f32` channels in `0.0..=1.0`.
//! Drawing primitives blend with source-over and clip silently at the edges, so
//! callers can draw particles that have drifted off-screen without checks.

use crate::color::Rgb;
use crate::error::{FireworksError, Result};

pub type Pixel = [f32; 4];

const TRANSPARENT: Pixel = [0.0; 4];

pub struct Layer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Layer {
    /// Creates a fully transparent layer.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let fail = |reason: &str| FireworksError::SurfaceInit {
            width,
            height,
            reason: reason.to_string(),
        };

        if width == 0 || height == 0 {
            return Err(fail("zero-sized surface"));
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| fail("pixel count overflows"))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| fail(&e.to_string()))?;
        pixels.resize(len, TRANSPARENT);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an opaque layer filled with `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        let mut layer = Self::new(width, height)?;
        layer.pixels.fill(opaque(color));
        Ok(layer)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// Overwrites this layer with `src`, resizing to match.
    pub fn copy_from(&mut self, src: &Layer) {
        self.width = src.width;
        self.height = src.height;
        self.pixels.clone_from(&src.pixels);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = opaque(color);
        }
    }

    /// Colour of a pixel as 8-bit channels, ignoring coverage. Meaningful on
    /// opaque layers such as the composited frame.
    pub fn rgb_at(&self, x: usize, y: usize) -> Rgb {
        match self.pixel(x, y) {
            Some([r, g, b, _]) => (to_u8(r), to_u8(g), to_u8(b)),
            None => (0, 0, 0),
        }
    }

    /// Source-over blend of a single pixel. Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: u8) {
        if alpha == 0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = alpha as f32 / 255.0;
        let src = [
            color.0 as f32 / 255.0 * a,
            color.1 as f32 / 255.0 * a,
            color.2 as f32 / 255.0 * a,
            a,
        ];
        let idx = y as usize * self.width + x as usize;
        over(&mut self.pixels[idx], src, 1.0);
    }

    pub fn draw_point(&mut self, x: i64, y: i64, color: Rgb, alpha: u8) {
        self.blend(x, y, color, alpha);
    }

    /// Bresenham line, both endpoints included.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb, alpha: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend(x, y, color, alpha);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Source-over composite of `src` onto this layer at `opacity`. Layers of
    /// different sizes are composited over their common area.
    pub fn composite(&mut self, src: &Layer, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let w = self.width.min(src.width);
        let h = self.height.min(src.height);
        for y in 0..h {
            let dst_row = &mut self.pixels[y * self.width..y * self.width + w];
            let src_row = &src.pixels[y * src.width..y * src.width + w];
            for (d, s) in dst_row.iter_mut().zip(src_row) {
                over(d, *s, opacity);
            }
        }
    }

    /// Equivalent to compositing this layer onto a fresh blank layer at
    /// `opacity`: every premultiplied channel is scaled by it.
    pub fn fade(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        for p in &mut self.pixels {
            for c in p.iter_mut() {
                *c *= opacity;
            }
        }
    }

    /// Sum of alpha over all pixels.
    pub fn total_opacity(&self) -> f64 {
        self.pixels.iter().map(|p| p[3] as f64).sum()
    }
}

fn opaque(color: Rgb) -> Pixel {
    [
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        1.0,
    ]
}

fn over(dst: &mut Pixel, src: Pixel, opacity: f32) {
    let inv = 1.0 - src[3] * opacity;
    for i in 0..4 {
        dst[i] = src[i] * opacity + dst[i] * inv;
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pixel offsets of a circle outline of the given radius, centred on the origin.
pub fn ring_offsets(radius: i32) -> Vec<(i32, i32)> {
    if radius <= 0 {
        return vec![(0, 0)];
    }

    let mut points = Vec::with_capacity(radius as usize * 8);
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            points.push((px, py));
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
    points.sort_unstable();
    points.dedup();
    points
}
