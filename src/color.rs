use crate::random::int_inclusive;

pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const BLACK: Rgb = (0, 0, 0);

const DARKEN: f64 = 0.7;

/// Each channel scaled by 0.7.
pub fn darker(c: Rgb) -> Rgb {
    (
        (c.0 as f64 * DARKEN) as u8,
        (c.1 as f64 * DARKEN) as u8,
        (c.2 as f64 * DARKEN) as u8,
    )
}

/// Each channel divided by 0.7 and clamped. Channels below 3 are lifted to 3
/// first so pure black still brightens.
pub fn brighter(c: Rgb) -> Rgb {
    const FLOOR: f64 = 3.0;
    if c == BLACK {
        return (3, 3, 3);
    }
    let lift = |v: u8| -> u8 {
        let v = v as f64;
        let v = if v > 0.0 && v < FLOOR { FLOOR } else { v };
        (v / DARKEN).min(255.0) as u8
    };
    (lift(c.0), lift(c.1), lift(c.2))
}

/// Warm orange used for launch, ascent and shot sparks.
pub fn spark_color() -> Rgb {
    (
        int_inclusive(180, 220) as u8,
        int_inclusive(80, 180) as u8,
        25,
    )
}

/// Firework colour biased towards one dominant channel.
pub fn firework_color() -> Rgb {
    let dominant = int_inclusive(0, 2);
    let channel = |i: i32| int_inclusive(if dominant == i { 230 } else { 0 }, 255) as u8;
    (channel(0), channel(1), channel(2))
}
