use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, Rgba, RgbaImage};
use palette::{LinSrgb, Pixel, Srgb};

use crate::color::ColorScale;
use crate::error::{Result, WordCloudError};
use crate::layout::PlacedWord;
use crate::text::{Rasterizer, Rotation};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneText {
    pub text: String,
    pub font_size: f32,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
    pub color: Rgba<u8>,
}

/// Colored words positioned relative to the canvas center.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgba<u8>,
    pub items: Vec<SceneText>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Scene {
            width,
            height,
            background,
            items: vec![],
        }
    }

    pub fn from_placed(
        words: &[PlacedWord],
        width: u32,
        height: u32,
        background: Rgba<u8>,
        scale: &mut ColorScale,
    ) -> Self {
        let mut scene = Scene::new(width, height, background);
        scene.items = words
            .iter()
            .map(|word| SceneText {
                text: word.text.clone(),
                font_size: word.size,
                x: word.x,
                y: word.y,
                rotation: word.rotation,
                color: scale.color(&word.text),
            })
            .collect();

        scene
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        );
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            hex(self.background)
        ));
        svg.push_str(&format!(
            "<g transform=\"translate({},{})\">\n",
            self.width / 2,
            self.height / 2
        ));
        for item in &self.items {
            svg.push_str(&format!(
                "<text text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"sans-serif\" style=\"font-size: {}px\" fill=\"{}\" transform=\"translate({},{})rotate({})\">{}</text>\n",
                item.font_size,
                hex(item.color),
                item.x,
                item.y,
                item.rotation.degrees(),
                html_escape::encode_text(&item.text)
            ));
        }
        svg.push_str("</g>\n</svg>\n");

        svg
    }

    /// Paints the scene over its background. Each word's sprite is centered
    /// on its position; anything outside the canvas is clipped.
    pub fn rasterize(&self, rasterizer: &dyn Rasterizer) -> Result<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(WordCloudError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }

        let mut buffer = RgbaImage::from_pixel(self.width, self.height, self.background);

        for item in &self.items {
            let sprite = rasterizer.sprite(&item.text, item.font_size, item.rotation);
            let left = (self.width / 2) as i64 + item.x as i64 - (sprite.width / 2) as i64;
            let top = (self.height / 2) as i64 + item.y as i64 - (sprite.height / 2) as i64;

            for y in 0..sprite.height {
                for x in 0..sprite.width {
                    let v = sprite.get(x, y);
                    let (final_x, final_y) = (left + x as i64, top + y as i64);
                    if v <= 0.0
                        || final_x < 0
                        || final_y < 0
                        || final_x >= self.width as i64
                        || final_y >= self.height as i64
                    {
                        continue;
                    }

                    let px = buffer.get_pixel_mut(final_x as u32, final_y as u32);
                    blend(px, item.color, v);
                }
            }
        }

        Ok(buffer)
    }
}

/// Mixes `color` over `px` by `coverage` in linear light.
fn blend(px: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let alpha = coverage * color[3] as f32 / 255.0;
    let under: LinSrgb = Srgb::new(px[0], px[1], px[2]).into_format::<f32>().into_linear();
    let over: LinSrgb = Srgb::new(color[0], color[1], color[2])
        .into_format::<f32>()
        .into_linear();

    let mixed = LinSrgb::new(
        under.red + (over.red - under.red) * alpha,
        under.green + (over.green - under.green) * alpha,
        under.blue + (over.blue - under.blue) * alpha,
    );
    let raw: [u8; 3] = Srgb::from_linear(mixed).into_format().into_raw();

    let out_alpha = px[3] as f32 + (255.0 - px[3] as f32) * alpha;
    *px = Rgba([raw[0], raw[1], raw[2], out_alpha.round() as u8]);
}

fn hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;

    Ok(bytes)
}
