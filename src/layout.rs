//! Spiral placement of sized words on a fixed canvas.
//!
//! Words go down largest first. Each one starts near the middle of the
//! canvas and walks outward along a spiral until its padded pixel mask fits
//! without touching anything already placed. Words that never fit are left
//! out.

use image::{GrayImage, Luma};
use log::{debug, info, warn};
use nanorand::{Rng, WyRand};

use crate::sat::{self, Point, Rect};
use crate::text::{Rasterizer, Rotation, Sprite};
use crate::tokenizer::WordEntry;

/// A word with its final position. `x` and `y` are the offset of the word's
/// center from the canvas center, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub size: f32,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spiral {
    Archimedean,
    Rectangular,
}

impl Spiral {
    fn walk(self, width: u32, height: u32) -> SpiralWalk {
        SpiralWalk {
            spiral: self,
            aspect: width as f64 / height as f64,
            step_y: 4.0,
            step_x: 4.0 * width as f64 / height as f64,
            x: 0.0,
            y: 0.0,
        }
    }
}

struct SpiralWalk {
    spiral: Spiral,
    aspect: f64,
    step_x: f64,
    step_y: f64,
    x: f64,
    y: f64,
}

impl SpiralWalk {
    /// Offset from the start point at time `t`. The rectangular walk is
    /// stateful and expects `t` to advance one step per call.
    fn at(&mut self, t: f64) -> (f64, f64) {
        match self.spiral {
            Spiral::Archimedean => {
                let t = t * 0.1;
                (self.aspect * t * t.cos(), t * t.sin())
            }
            Spiral::Rectangular => {
                let sign = if t < 0.0 { -1.0 } else { 1.0 };
                match ((1.0 + 4.0 * sign * t).sqrt() - sign) as i64 & 3 {
                    0 => self.x += self.step_x,
                    1 => self.y += self.step_y,
                    2 => self.x -= self.step_x,
                    _ => self.y -= self.step_y,
                }
                (self.x, self.y)
            }
        }
    }
}

/// Padded collision footprint of a sprite.
struct Mask {
    rect: Rect,
    bits: Vec<bool>,
}

impl Mask {
    fn from_sprite(sprite: &Sprite, padding: u32) -> Self {
        let pad = padding as usize;
        let (width, height) = (
            sprite.width as usize + 2 * pad,
            sprite.height as usize + 2 * pad,
        );

        let mut bits = vec![false; width * height];
        for y in 0..sprite.height {
            for x in 0..sprite.width {
                if sprite.get(x, y) > 0.0 {
                    bits[(y as usize + pad) * width + x as usize + pad] = true;
                }
            }
        }

        if pad > 0 {
            bits = dilate(&bits, width, height, pad);
        }

        Mask {
            rect: Rect {
                width: width as u32,
                height: height as u32,
            },
            bits,
        }
    }
}

fn dilate(bits: &[bool], width: usize, height: usize, pad: usize) -> Vec<bool> {
    let mut horizontal = vec![false; bits.len()];
    for y in 0..height {
        let row = &bits[y * width..(y + 1) * width];
        for x in 0..width {
            let from = x.saturating_sub(pad);
            let to = (x + pad).min(width - 1);
            horizontal[y * width + x] = row[from..=to].iter().any(|b| *b);
        }
    }

    let mut out = vec![false; bits.len()];
    for y in 0..height {
        let from = y.saturating_sub(pad);
        let to = (y + pad).min(height - 1);
        for x in 0..width {
            out[y * width + x] = (from..=to).any(|yy| horizontal[yy * width + x]);
        }
    }

    out
}

/// Pixels already claimed by placed words.
struct Board {
    cells: GrayImage,
    table: Vec<u32>,
}

impl Board {
    fn new(width: u32, height: u32) -> Self {
        Board {
            cells: GrayImage::from_pixel(width, height, Luma([0])),
            table: vec![0; sat::table_len(width, height)],
        }
    }

    fn fits(&self, mask: &Mask, left: i64, top: i64) -> bool {
        if left < 0
            || top < 0
            || left + mask.rect.width as i64 > self.cells.width() as i64
            || top + mask.rect.height as i64 > self.cells.height() as i64
        {
            return false;
        }

        let at = Point {
            x: left as u32,
            y: top as u32,
        };
        let table_width = self.cells.width() as usize + 1;
        if sat::region_is_empty(&self.table, table_width, at, mask.rect) {
            return true;
        }

        !self.collides(mask, at)
    }

    fn collides(&self, mask: &Mask, at: Point) -> bool {
        let board_width = self.cells.width() as usize;
        let cells = self.cells.as_raw();
        let mask_width = mask.rect.width as usize;

        mask.bits
            .chunks_exact(mask_width)
            .enumerate()
            .any(|(y, row)| {
                let start = (at.y as usize + y) * board_width + at.x as usize;
                row.iter()
                    .zip(&cells[start..start + mask_width])
                    .any(|(bit, cell)| *bit && *cell != 0)
            })
    }

    fn occupy(&mut self, mask: &Mask, at: Point) {
        let mask_width = mask.rect.width as usize;

        for (y, row) in mask.bits.chunks_exact(mask_width).enumerate() {
            for (x, bit) in row.iter().enumerate() {
                if *bit {
                    self.cells
                        .put_pixel(at.x + x as u32, at.y + y as u32, Luma([1]));
                }
            }
        }

        sat::to_summed_area_table(
            self.cells.as_raw(),
            self.cells.width() as usize,
            &mut self.table,
            at.y as usize,
        );
    }
}

pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub spiral: Spiral,
    pub rotate_chance: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            width: 700,
            height: 700,
            padding: 5,
            spiral: Spiral::Archimedean,
            rotate_chance: 0.2,
        }
    }
}

impl Layout {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, value: u32) -> Self {
        self.padding = value;
        self
    }

    pub fn with_spiral(mut self, value: Spiral) -> Self {
        self.spiral = value;
        self
    }

    pub fn with_rotate_chance(mut self, value: f64) -> Self {
        self.rotate_chance = value.clamp(0.0, 1.0);
        self
    }

    pub fn place(
        &self,
        entries: &[WordEntry],
        rasterizer: &dyn Rasterizer,
        rng: &mut WyRand,
    ) -> Vec<PlacedWord> {
        if self.width == 0 || self.height == 0 {
            return vec![];
        }

        let mut order: Vec<&WordEntry> = entries.iter().collect();
        order.sort_by(|a, b| b.size.total_cmp(&a.size));

        let mut board = Board::new(self.width, self.height);
        let mut placed = Vec::with_capacity(order.len());

        for entry in order {
            let rotation = self.roll_rotation(rng);
            let start_x = (self.width as f64 * (unit(rng) + 0.5)) as i64 >> 1;
            let start_y = (self.height as f64 * (unit(rng) + 0.5)) as i64 >> 1;
            let dt = if rng.generate::<bool>() { 1.0 } else { -1.0 };

            if !self.can_hold(rasterizer, entry, rotation) {
                debug!("No room for '{}' at size {}", entry.text, entry.size);
                continue;
            }

            let sprite = rasterizer.sprite(&entry.text, entry.size, rotation);
            if sprite.is_empty() {
                debug!("Skipping '{}', nothing to draw", entry.text);
                continue;
            }
            let mask = Mask::from_sprite(&sprite, self.padding);

            match self.search(&board, &mask, start_x, start_y, dt) {
                Some(at) => {
                    board.occupy(&mask, at);

                    let center_x = at.x as i64 + (mask.rect.width / 2) as i64;
                    let center_y = at.y as i64 + (mask.rect.height / 2) as i64;
                    placed.push(PlacedWord {
                        text: entry.text.clone(),
                        size: entry.size,
                        x: (center_x - (self.width / 2) as i64) as i32,
                        y: (center_y - (self.height / 2) as i64) as i32,
                        rotation,
                    });
                }
                None => debug!("No room for '{}' at size {}", entry.text, entry.size),
            }
        }

        if placed.is_empty() && !entries.is_empty() {
            warn!("None of the {} words fit on the canvas", entries.len());
        } else {
            info!("Placed {} of {} words", placed.len(), entries.len());
        }

        placed
    }

    pub fn roll_rotation(&self, rng: &mut WyRand) -> Rotation {
        if unit(rng) < self.rotate_chance {
            Rotation::Vertical
        } else {
            Rotation::Horizontal
        }
    }

    /// Whether the padded word could fit on an empty canvas at all, checked
    /// before paying for its sprite.
    fn can_hold(
        &self,
        rasterizer: &dyn Rasterizer,
        entry: &WordEntry,
        rotation: Rotation,
    ) -> bool {
        let (width, height) = rasterizer.extent(&entry.text, entry.size);
        let (width, height) = match rotation {
            Rotation::Horizontal => (width, height),
            Rotation::Vertical => (height, width),
        };
        let padding = 2.0 * self.padding as f32;

        width + padding <= self.width as f32 && height + padding <= self.height as f32
    }

    fn search(
        &self,
        board: &Board,
        mask: &Mask,
        start_x: i64,
        start_y: i64,
        dt: f64,
    ) -> Option<Point> {
        let max_delta = ((self.width as f64).powi(2) + (self.height as f64).powi(2)).sqrt();
        let mut walk = self.spiral.walk(self.width, self.height);
        let half_width = (mask.rect.width / 2) as i64;
        let half_height = (mask.rect.height / 2) as i64;

        let mut t = -dt;
        loop {
            t += dt;
            let (dx, dy) = walk.at(t);
            let (dx, dy) = (dx.trunc(), dy.trunc());
            if dx.abs().min(dy.abs()) >= max_delta {
                return None;
            }

            let left = start_x + dx as i64 - half_width;
            let top = start_y + dy as i64 - half_height;
            if board.fits(mask, left, top) {
                return Some(Point {
                    x: left as u32,
                    y: top as u32,
                });
            }
        }
    }
}

/// Uniform in `[0, 1)`.
fn unit(rng: &mut WyRand) -> f64 {
    rng.generate::<u32>() as f64 / (u32::MAX as f64 + 1.0)
}
