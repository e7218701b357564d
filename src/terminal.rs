//! Half-block terminal presentation and pointer mapping.
//!
//! Each terminal cell shows two stacked pixels: the cell background is the
//! top pixel and the foreground of `▄` is the bottom one. The simulation runs
//! at `scale` logical pixels per half-cell and is max-pooled down so single
//! pixel sparks stay visible.

use std::io::{self, Write};

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

use crate::color::Rgb;
use crate::factory::EffectKind;
use crate::layer::Layer;
use crate::vector::Vector2D;

pub struct HalfBlockPresenter {
    cols: usize,
    rows: usize,
    scale: usize,
    output_buf: Vec<u8>,
}

impl HalfBlockPresenter {
    pub fn new(cols: usize, rows: usize, scale: usize) -> Self {
        Self {
            cols,
            rows,
            scale: scale.max(1),
            output_buf: Vec::with_capacity(cols * rows * 25),
        }
    }

    /// Logical pixel size of the simulation for this terminal.
    pub fn logical_size(&self) -> (usize, usize) {
        (self.cols * self.scale, self.rows * 2 * self.scale)
    }

    /// Centre of the logical pixel block under a terminal cell.
    pub fn cell_to_logical(&self, column: u16, row: u16) -> Vector2D {
        let s = self.scale as f64;
        Vector2D::new(
            column as f64 * s + s / 2.0,
            row as f64 * 2.0 * s + s,
        )
    }

    fn pooled(&self, frame: &Layer, px: usize, py: usize) -> Rgb {
        let mut out = (0u8, 0u8, 0u8);
        let x0 = px * self.scale;
        let y0 = py * self.scale;
        for y in y0..(y0 + self.scale).min(frame.height()) {
            for x in x0..(x0 + self.scale).min(frame.width()) {
                let (r, g, b) = frame.rgb_at(x, y);
                out = (out.0.max(r), out.1.max(g), out.2.max(b));
            }
        }
        out
    }

    pub fn present<W: Write>(&mut self, frame: &Layer, out: &mut W) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        for row in 0..self.rows {
            // escapes are reset at the end of every row
            let mut prev_top_color: Option<Rgb> = None;
            let mut prev_bot_color: Option<Rgb> = None;

            for col in 0..self.cols {
                let top_color = self.pooled(frame, col, row * 2);
                let bot_color = self.pooled(frame, col, row * 2 + 1);

                if prev_top_color != Some(top_color) {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = Some(top_color);
                }
                if prev_bot_color != Some(bot_color) {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = Some(bot_color);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            if row + 1 < self.rows {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }
}

/// Press fires shot sparks, drag leaves trail sparks, release explodes.
pub fn pointer_effect(event: &Event) -> Option<(EffectKind, u16, u16)> {
    let Event::Mouse(MouseEvent {
        kind, column, row, ..
    }) = event
    else {
        return None;
    };
    let effect = match kind {
        MouseEventKind::Down(MouseButton::Left) => EffectKind::ShotSparks,
        MouseEventKind::Drag(MouseButton::Left) => EffectKind::TrailSparks,
        MouseEventKind::Up(MouseButton::Left) => EffectKind::Explosion,
        _ => return None,
    };
    Some((effect, *column, *row))
}
