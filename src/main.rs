use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use text_wcloud::{
    parse_color, ColorScheme, GlyphRasterizer, Layout, Session, Spiral, Tokenizer, WordCloud,
    DOWNLOAD_FILE_NAME,
};

#[derive(Clone, Copy, ValueEnum)]
enum SpiralArg {
    Archimedean,
    Rectangular,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Category10,
    Elegant,
}

/// Render a word cloud PNG from free text.
#[derive(Parser)]
#[clap(name = "wcloud", version, about)]
struct Cli {
    /// Text file to read, `-` or nothing for stdin
    #[clap(value_parser)]
    input: Option<PathBuf>,

    /// Where to write the PNG
    #[clap(short, long, value_parser, default_value = DOWNLOAD_FILE_NAME)]
    output: PathBuf,

    /// Also write the scene as SVG
    #[clap(long, value_parser)]
    svg: Option<PathBuf>,

    /// TrueType/OpenType font, defaults to a known system font
    #[clap(long, value_parser)]
    font: Option<PathBuf>,

    /// Seed for rotation, placement and palette choice
    #[clap(long, value_parser)]
    seed: Option<u64>,

    #[clap(long, value_parser, default_value_t = 700)]
    width: u32,

    #[clap(long, value_parser, default_value_t = 700)]
    height: u32,

    /// Minimum gap between words, in pixels
    #[clap(long, value_parser, default_value_t = 5)]
    padding: u32,

    /// Probability that a word is drawn vertically
    #[clap(long, value_parser, default_value_t = 0.2)]
    rotate_chance: f64,

    #[clap(long, value_enum)]
    spiral: Option<SpiralArg>,

    /// Fixed palette, otherwise one is picked at random
    #[clap(long, value_enum)]
    scheme: Option<SchemeArg>,

    /// Comma separated CSS colors, overrides --scheme
    #[clap(long, value_parser, value_delimiter = ',')]
    palette: Vec<String>,

    #[clap(long, value_parser, default_value = "#ffffff")]
    background: String,

    /// Keep only the N most frequent words, 0 keeps all
    #[clap(long, value_parser, default_value_t = 0)]
    max_words: usize,

    /// Extra words to leave out
    #[clap(long = "exclude", value_parser)]
    excluded: Vec<String>,
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Unable to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let text = read_input(cli.input.as_ref())?;

    let rasterizer = match &cli.font {
        Some(path) => GlyphRasterizer::from_path(path)
            .with_context(|| format!("Unable to load font {}", path.display()))?,
        None => GlyphRasterizer::from_system()?,
    };

    let excluded: Vec<&str> = cli.excluded.iter().map(String::as_str).collect();
    let tokenizer = Tokenizer::default()
        .with_max_words(cli.max_words)
        .with_filter(&excluded);

    let spiral = match cli.spiral {
        Some(SpiralArg::Rectangular) => Spiral::Rectangular,
        Some(SpiralArg::Archimedean) | None => Spiral::Archimedean,
    };
    let layout = Layout::default()
        .with_size(cli.width, cli.height)
        .with_padding(cli.padding)
        .with_spiral(spiral)
        .with_rotate_chance(cli.rotate_chance);

    let mut wordcloud = WordCloud::new(rasterizer)
        .with_tokenizer(tokenizer)
        .with_layout(layout)
        .with_background_color(parse_color(&cli.background)?);

    let scheme = if !cli.palette.is_empty() {
        Some(ColorScheme::Custom(cli.palette.clone()))
    } else {
        cli.scheme.map(|scheme| match scheme {
            SchemeArg::Category10 => ColorScheme::Category10,
            SchemeArg::Elegant => ColorScheme::Elegant,
        })
    };
    if let Some(scheme) = scheme {
        wordcloud = wordcloud.with_color_scheme(scheme);
    }
    if let Some(seed) = cli.seed {
        wordcloud = wordcloud.with_rng_seed(seed);
    }

    let mut session = Session::new(wordcloud);

    let now = Instant::now();
    let result = session.generate(&text)?;
    info!(
        "Generated {} words ({:?}, {:?}) in {}ms",
        result.words.len(),
        result.language,
        result.color_scheme,
        now.elapsed().as_millis()
    );

    if let Some(path) = &cli.svg {
        result
            .save_svg(path)
            .with_context(|| format!("Unable to write {}", path.display()))?;
    }

    session
        .save(&cli.output)
        .with_context(|| format!("Unable to write {}", cli.output.display()))?;

    Ok(())
}
