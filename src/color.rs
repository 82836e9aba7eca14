use std::collections::HashMap;

use image::Rgba;
use nanorand::{Rng, WyRand};

use crate::error::{Result, WordCloudError};

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const ELEGANT: &[&str] = &[
    "#ff6f61", "#6b5b95", "#88b04b", "#d65076", "#45b8ac", "#e94b3c", "#6b4226", "#f4a7b9",
    "#9b2335", "#5b5ea6",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Bold categorical colors.
    Category10,
    Elegant,
    /// Any CSS colors, e.g. `#336699` or `teal`.
    Custom(Vec<String>),
}

impl ColorScheme {
    /// One of the two built-in schemes with equal odds.
    pub fn random(rng: &mut WyRand) -> Self {
        match rng.generate_range(0..2u32) {
            0 => ColorScheme::Category10,
            _ => ColorScheme::Elegant,
        }
    }

    pub fn colors(&self) -> Vec<&str> {
        match self {
            ColorScheme::Category10 => CATEGORY10.to_vec(),
            ColorScheme::Elegant => ELEGANT.to_vec(),
            ColorScheme::Custom(colors) => colors.iter().map(String::as_str).collect(),
        }
    }

    pub fn to_scale(&self) -> Result<ColorScale> {
        let range = self
            .colors()
            .into_iter()
            .map(parse_color)
            .collect::<Result<Vec<_>>>()?;

        Ok(ColorScale::new(range))
    }
}

pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let parsed = csscolorparser::parse(color).map_err(|source| WordCloudError::InvalidColor {
        color: color.to_string(),
        source,
    })?;

    Ok(Rgba(parsed.to_rgba8()))
}

/// Gives each new key the next color of the range, wrapping around. A key
/// keeps its color for the lifetime of the scale.
pub struct ColorScale {
    range: Vec<Rgba<u8>>,
    domain: HashMap<String, usize>,
}

impl ColorScale {
    pub fn new(range: Vec<Rgba<u8>>) -> Self {
        ColorScale {
            range,
            domain: HashMap::new(),
        }
    }

    pub fn color(&mut self, key: &str) -> Rgba<u8> {
        if self.range.is_empty() {
            return Rgba([0, 0, 0, 255]);
        }

        let next = self.domain.len();
        let index = *self.domain.entry(key.to_string()).or_insert(next);

        self.range[index % self.range.len()]
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use nanorand::WyRand;

    use super::{parse_color, ColorScale, ColorScheme};
    use crate::error::WordCloudError;

    #[test]
    fn scale_assigns_colors_in_order_and_remembers_them() {
        let mut scale = ColorScheme::Category10.to_scale().unwrap();

        assert_eq!(scale.color("rust"), Rgba([0x1f, 0x77, 0xb4, 255]));
        assert_eq!(scale.color("crab"), Rgba([0xff, 0x7f, 0x0e, 255]));
        assert_eq!(scale.color("rust"), Rgba([0x1f, 0x77, 0xb4, 255]));
    }

    #[test]
    fn scale_wraps_around() {
        let mut scale = ColorScale::new(vec![Rgba([1, 1, 1, 255]), Rgba([2, 2, 2, 255])]);

        scale.color("a");
        scale.color("b");
        assert_eq!(scale.color("c"), Rgba([1, 1, 1, 255]));
    }

    #[test]
    fn builtin_palettes_parse() {
        for scheme in [ColorScheme::Category10, ColorScheme::Elegant] {
            assert_eq!(scheme.colors().len(), 10);
            assert!(scheme.to_scale().is_ok());
        }
        assert_eq!(parse_color("#ff6f61").unwrap(), Rgba([0xff, 0x6f, 0x61, 255]));
        assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn custom_palette_reports_bad_colors() {
        let scheme = ColorScheme::Custom(vec!["#000000".into(), "not-a-color".into()]);

        match scheme.to_scale() {
            Err(WordCloudError::InvalidColor { color, .. }) => assert_eq!(color, "not-a-color"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn random_scheme_is_seeded() {
        let picks = |seed| {
            let mut rng = WyRand::new_seed(seed);
            (0..8).map(|_| ColorScheme::random(&mut rng)).collect::<Vec<_>>()
        };

        assert_eq!(picks(7), picks(7));
        assert!(picks(7)
            .iter()
            .all(|scheme| matches!(scheme, ColorScheme::Category10 | ColorScheme::Elegant)));
    }
}
