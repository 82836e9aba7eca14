use std::{fs, path::Path, path::PathBuf};

use log::info;

use crate::{Result, WordCloud, WordCloudError, WordCloudImage};

pub const DOWNLOAD_FILE_NAME: &str = "word-cloud.png";

/// Holds the generator and the most recent result for an interactive front
/// end. Generating needs `&mut self`, so a second request cannot start while
/// one is still running.
pub struct Session {
    word_cloud: WordCloud,
    current: Option<(WordCloudImage, Vec<u8>)>,
}

impl Session {
    pub fn new(word_cloud: WordCloud) -> Self {
        Session {
            word_cloud,
            current: None,
        }
    }

    /// On failure the previous image, if any, is kept.
    pub fn generate(&mut self, text: &str) -> Result<&WordCloudImage> {
        let image = self.word_cloud.generate_from_text(text)?;
        let png = image.to_png()?;

        let (image, _) = self.current.insert((image, png));
        Ok(image)
    }

    pub fn image(&self) -> Option<&WordCloudImage> {
        self.current.as_ref().map(|(image, _)| image)
    }

    pub fn png(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, png)| png.as_slice())
    }

    pub fn can_download(&self) -> bool {
        self.current.is_some()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let png = self.png().ok_or(WordCloudError::NothingToDownload)?;
        fs::write(path.as_ref(), png)?;

        info!("Saved word cloud to {}", path.as_ref().display());
        Ok(())
    }

    /// Writes the image as `word-cloud.png` inside `dir`.
    pub fn download(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
        self.save(&path)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, DOWNLOAD_FILE_NAME};
    use crate::{BoxRasterizer, Layout, WordCloud, WordCloudError};

    fn session() -> Session {
        Session::new(
            WordCloud::new(BoxRasterizer::default())
                .with_layout(Layout::default().with_size(200, 200))
                .with_rng_seed(1),
        )
    }

    #[test]
    fn nothing_to_download_before_generating() {
        let session = session();
        let dir = tempfile::tempdir().unwrap();

        assert!(!session.can_download());
        assert!(matches!(
            session.download(dir.path()),
            Err(WordCloudError::NothingToDownload)
        ));
    }

    #[test]
    fn download_writes_png() {
        let mut session = session();
        let dir = tempfile::tempdir().unwrap();

        session.generate("ferris ferris crab claws").unwrap();
        assert!(session.can_download());

        let path = session.download(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(std::fs::read(&path).unwrap(), session.png().unwrap());
    }

    #[test]
    fn failed_generation_keeps_previous_image() {
        let mut session = session();

        session.generate("ferris crab").unwrap();
        let words = session.image().unwrap().words.clone();

        assert!(matches!(
            session.generate("   "),
            Err(WordCloudError::EmptyInput)
        ));
        assert_eq!(session.image().unwrap().words, words);
    }
}
