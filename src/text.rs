use std::{
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, OutlinedGlyph, Point, PxScale, ScaleFont};
use log::debug;

use crate::error::{Result, WordCloudError};

/// Fonts tried in order when none is configured.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Horizontal,
    /// A quarter turn clockwise.
    Vertical,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Horizontal => 0,
            Rotation::Vertical => 90,
        }
    }
}

/// Coverage bitmap of one rendered word, row-major, values in `0.0..=1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<f32>,
}

impl Sprite {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_value(width, height, 0.0)
    }

    pub fn filled(width: u32, height: u32) -> Self {
        Self::with_value(width, height, 1.0)
    }

    /// Falls back to an empty sprite when the area does not fit in memory
    /// indices.
    fn with_value(width: u32, height: u32, value: f32) -> Self {
        match (width as usize).checked_mul(height as usize) {
            Some(len) => Sprite {
                width,
                height,
                coverage: vec![value; len],
            },
            None => Sprite {
                width: 0,
                height: 0,
                coverage: vec![],
            },
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.coverage[self.index(x, y)]
    }

    fn add(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            let el = &mut self.coverage[index];
            *el = (*el + value).min(1.0);
        }
    }

    pub fn rotated(self, rotation: Rotation) -> Sprite {
        match rotation {
            Rotation::Horizontal => self,
            Rotation::Vertical => self.rotate_clockwise(),
        }
    }

    fn rotate_clockwise(self) -> Sprite {
        let (width, height) = (self.height, self.width);
        let mut coverage = Vec::with_capacity(self.coverage.len());

        for y in 0..height {
            for x in 0..width {
                coverage.push(self.get(y, self.height - 1 - x));
            }
        }

        Sprite {
            width,
            height,
            coverage,
        }
    }
}

/// Turns a word at a font size into a coverage sprite.
pub trait Rasterizer {
    fn rasterize(&self, text: &str, font_size: f32) -> Sprite;

    /// Approximate unrotated `(width, height)` of the word without drawing
    /// it.
    fn extent(&self, text: &str, font_size: f32) -> (f32, f32);

    fn sprite(&self, text: &str, font_size: f32, rotation: Rotation) -> Sprite {
        self.rasterize(text, font_size).rotated(rotation)
    }
}

/// Draws words with a real font.
pub struct GlyphRasterizer {
    font: FontVec,
}

impl GlyphRasterizer {
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<PathBuf>) -> Result<Self> {
        let font =
            FontVec::try_from_vec(bytes).map_err(|_| WordCloudError::InvalidFont(origin.into()))?;

        Ok(GlyphRasterizer { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font_file = fs::read(path)?;

        Self::from_bytes(font_file, path)
    }

    pub fn from_system() -> Result<Self> {
        let path = SYSTEM_FONT_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.is_file())
            .ok_or(WordCloudError::FontNotFound)?;

        debug!("Using system font {}", path.display());
        Self::from_path(path)
    }

    /// CSS-style pixel size, i.e. pixels per em.
    fn scale_for(&self, font_size: f32) -> PxScale {
        self.font
            .pt_to_px_scale(font_size * 72.0 / 96.0)
            .unwrap_or_else(|| PxScale::from(font_size))
    }
}

impl Rasterizer for GlyphRasterizer {
    fn rasterize(&self, text: &str, font_size: f32) -> Sprite {
        let glyphs = text_to_glyphs(text, &self.font, self.scale_for(font_size));
        let outlined: Vec<OutlinedGlyph> = glyphs
            .into_iter()
            .filter_map(|glyph| self.font.outline_glyph(glyph))
            .collect();

        let bounds = match outlined.iter().map(|g| g.px_bounds()).reduce(|a, b| {
            ab_glyph::Rect {
                min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
                max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
            }
        }) {
            Some(bounds) => bounds,
            None => return Sprite::new(0, 0),
        };

        let mut sprite = Sprite::new(
            (bounds.max.x - bounds.min.x).ceil() as u32,
            (bounds.max.y - bounds.min.y).ceil() as u32,
        );

        for glyph in outlined {
            let glyph_bounds = glyph.px_bounds();
            let (offset_x, offset_y) = (
                (glyph_bounds.min.x - bounds.min.x) as u32,
                (glyph_bounds.min.y - bounds.min.y) as u32,
            );

            glyph.draw(|x, y, v| sprite.add(offset_x + x, offset_y + y, v));
        }

        sprite
    }

    fn extent(&self, text: &str, font_size: f32) -> (f32, f32) {
        let scaled_font = self.font.as_scaled(self.scale_for(font_size));

        let mut width = 0.0;
        let mut last_glyph: Option<GlyphId> = None;
        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled_font.glyph_id(c);
            if let Some(previous) = last_glyph.take() {
                width += scaled_font.kern(previous, id);
            }
            width += scaled_font.h_advance(id);
            last_glyph = Some(id);
        }

        (width, scaled_font.height())
    }
}

/// Draws every word as a solid box, `advance` em wide per character and one
/// em tall. Needs no font, so layouts can be previewed and tested anywhere.
pub struct BoxRasterizer {
    pub advance: f32,
}

impl Default for BoxRasterizer {
    fn default() -> Self {
        BoxRasterizer { advance: 0.6 }
    }
}

impl Rasterizer for BoxRasterizer {
    fn rasterize(&self, text: &str, font_size: f32) -> Sprite {
        let chars = text.chars().count() as f32;
        if chars == 0.0 || font_size <= 0.0 {
            return Sprite::new(0, 0);
        }

        let (width, height) = self.extent(text, font_size);
        Sprite::filled(width.ceil() as u32, height.ceil() as u32)
    }

    fn extent(&self, text: &str, font_size: f32) -> (f32, f32) {
        let chars = text.chars().count() as f32;

        (chars * font_size * self.advance, font_size)
    }
}

//把文本转换为字形，方便画图
pub fn text_to_glyphs(text: &str, font: &FontVec, scale: PxScale) -> Vec<Glyph> {
    let scaled_font = font.as_scaled(scale);

    let mut glyphs: Vec<Glyph> = vec![];
    layout_paragraph(scaled_font, point(0.0, 0.0), text, &mut glyphs);

    glyphs
}

pub fn layout_paragraph<F, SF>(font: SF, position: Point, text: &str, target: &mut Vec<Glyph>)
where
    F: Font,
    SF: ScaleFont<F>,
{
    let v_advance = font.height() + font.line_gap();
    let mut caret = position + point(0.0, font.ascent());
    let mut last_glyph: Option<GlyphId> = None;
    for c in text.chars() {
        if c.is_control() {
            if c == '\n' {
                caret = point(position.x, caret.y + v_advance);
            }
            continue;
        }

        let mut glyph = font.scaled_glyph(c);
        if let Some(previous) = last_glyph.take() {
            caret.x += font.kern(previous, glyph.id);
        }
        glyph.position = caret;
        last_glyph = Some(glyph.id);
        caret.x += font.h_advance(glyph.id);

        target.push(glyph);
    }
}
