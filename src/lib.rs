use std::{fs, path::Path};

use image::{Rgba, RgbaImage};
use log::debug;
use nanorand::WyRand;

pub use color::{parse_color, ColorScale, ColorScheme};
pub use error::{Result, WordCloudError};
pub use language::{Language, LanguageDetector};
pub use layout::{Layout, PlacedWord, Spiral};
pub use render::{encode_png, Scene, SceneText};
pub use session::{Session, DOWNLOAD_FILE_NAME};
pub use text::{BoxRasterizer, GlyphRasterizer, Rasterizer, Rotation, Sprite};
pub use tokenizer::{font_size_for_count, Tokenizer, WordEntry};

mod color;
mod error;
mod language;
mod layout;
mod render;
mod sat;
mod session;
mod text;
mod tokenizer;

/// Everything one generation produced.
pub struct WordCloudImage {
    pub language: Language,
    pub color_scheme: ColorScheme,
    pub words: Vec<PlacedWord>,
    pub scene: Scene,
    pub image: RgbaImage,
}

impl WordCloudImage {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_png()?)?;
        Ok(())
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.scene.to_svg())?;
        Ok(())
    }
}

pub struct WordCloud {
    tokenizer: Tokenizer,
    detector: LanguageDetector,
    layout: Layout,
    rasterizer: Box<dyn Rasterizer>,
    background_color: Rgba<u8>,
    color_scheme: Option<ColorScheme>,
    rng_seed: Option<u64>,
}

impl WordCloud {
    pub fn new(rasterizer: impl Rasterizer + 'static) -> Self {
        WordCloud {
            tokenizer: Tokenizer::default(),
            detector: LanguageDetector::default(),
            layout: Layout::default(),
            rasterizer: Box::new(rasterizer),
            background_color: Rgba([255, 255, 255, 255]),
            color_scheme: None,
            rng_seed: None,
        }
    }

    pub fn from_font_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(GlyphRasterizer::from_path(path)?))
    }

    pub fn from_system_font() -> Result<Self> {
        Ok(Self::new(GlyphRasterizer::from_system()?))
    }

    pub fn with_tokenizer(mut self, value: Tokenizer) -> Self {
        self.tokenizer = value;
        self
    }

    pub fn with_layout(mut self, value: Layout) -> Self {
        self.layout = value;
        self
    }

    pub fn with_background_color(mut self, value: Rgba<u8>) -> Self {
        self.background_color = value;
        self
    }

    /// Fixes the palette instead of picking one at random per generation.
    pub fn with_color_scheme(mut self, value: ColorScheme) -> Self {
        self.color_scheme = Some(value);
        self
    }

    pub fn with_rng_seed(mut self, value: u64) -> Self {
        self.rng_seed = Some(value);
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Counts and sizes the words of `text` using the stop-words of its
    /// detected language.
    pub fn score(&self, text: &str) -> (Language, Vec<WordEntry>) {
        let language = self.detector.detect(text);
        let stopwords = self.tokenizer.stopwords_for(language.stopwords());

        (language, self.tokenizer.score(text, &stopwords))
    }

    pub fn generate_from_text(&self, text: &str) -> Result<WordCloudImage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WordCloudError::EmptyInput);
        }

        let mut rng = match self.rng_seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        let (language, entries) = self.score(text);
        debug!("Detected {:?}, {} distinct words", language, entries.len());

        let words = self.layout.place(&entries, self.rasterizer.as_ref(), &mut rng);

        let color_scheme = match &self.color_scheme {
            Some(scheme) => scheme.clone(),
            None => ColorScheme::random(&mut rng),
        };
        let mut scale = color_scheme.to_scale()?;

        let scene = Scene::from_placed(
            &words,
            self.layout.width,
            self.layout.height,
            self.background_color,
            &mut scale,
        );
        let image = scene.rasterize(self.rasterizer.as_ref())?;

        Ok(WordCloudImage {
            language,
            color_scheme,
            words,
            scene,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::{BoxRasterizer, ColorScheme, Language, Layout, WordCloud, WordCloudError};

    const TEXT: &str = "Rust is a language. Rust is fast, Rust is safe! \
        Cargo builds crates; cargo tests crates. The borrow checker checks borrows.";

    fn cloud() -> WordCloud {
        WordCloud::new(BoxRasterizer::default())
            .with_layout(Layout::default().with_size(400, 400))
            .with_rng_seed(17)
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(matches!(
            cloud().generate_from_text("  \n\t "),
            Err(WordCloudError::EmptyInput)
        ));
    }

    #[test]
    fn scores_with_detected_language() {
        let (language, entries) = cloud().score(TEXT);

        assert_eq!(language, Language::English);
        assert_eq!(entries[0].text, "rust");
        assert_eq!(entries[0].count, 3);
        assert!(entries.iter().all(|e| e.text != "is" && e.text != "the"));

        let (language, entries) = cloud().score("o gato que come o rato que corre");
        assert_eq!(language, Language::Portuguese);
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["come", "corre", "gato", "rato"]);
    }

    #[test]
    fn stopwords_only_text_renders_blank_canvas() {
        let result = cloud().generate_from_text("the and of to in").unwrap();

        assert!(result.words.is_empty());
        assert_eq!(result.image.dimensions(), (400, 400));
        assert!(result
            .image
            .pixels()
            .all(|px| *px == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn word_repeated_past_canvas_size_renders_blank() {
        let result = WordCloud::new(BoxRasterizer::default())
            .with_rng_seed(1)
            .generate_from_text(&"ferris ".repeat(1000))
            .unwrap();

        assert!(result.words.is_empty());
        assert_eq!(result.image.dimensions(), (700, 700));
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let first = cloud().generate_from_text(TEXT).unwrap();
        let second = cloud().generate_from_text(TEXT).unwrap();

        assert!(!first.words.is_empty());
        assert_eq!(first.words, second.words);
        assert_eq!(first.color_scheme, second.color_scheme);
        assert_eq!(first.image, second.image);
        assert!(first.image.pixels().any(|px| *px != Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn fixed_scheme_colors_every_word_from_it() {
        let result = cloud()
            .with_color_scheme(ColorScheme::Elegant)
            .generate_from_text(TEXT)
            .unwrap();

        let elegant: Vec<Rgba<u8>> = ColorScheme::Elegant
            .colors()
            .into_iter()
            .map(|c| super::parse_color(c).unwrap())
            .collect();
        assert_eq!(result.color_scheme, ColorScheme::Elegant);
        assert!(result
            .scene
            .items
            .iter()
            .all(|item| elegant.contains(&item.color)));
    }
}
