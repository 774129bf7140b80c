//! Screenshot capture
//!
//! Reads back the current frame from the canvas and writes it as a BMP
//! named after the local time, e.g. `parallax_20240821_153000.bmp`.

use sdl2::pixels::PixelFormatEnum;
use sdl2::render::Canvas;
use sdl2::surface::Surface;
use sdl2::video::Window;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ScreenshotManager {
    directory: PathBuf,
    taken: u32,
}

impl ScreenshotManager {
    /// The directory is created lazily on the first capture
    pub fn new(directory: impl AsRef<Path>) -> Self {
        ScreenshotManager {
            directory: directory.as_ref().to_path_buf(),
            taken: 0,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Screenshots written so far this session
    pub fn taken(&self) -> u32 {
        self.taken
    }

    pub fn capture(&mut self, canvas: &Canvas<Window>) -> Result<PathBuf, ScreenshotError> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory)?;
        }

        let (width, height) = canvas.output_size().map_err(ScreenshotError::Sdl)?;
        let format = PixelFormatEnum::ARGB8888;
        let mut pixels = canvas
            .read_pixels(None, format)
            .map_err(ScreenshotError::Sdl)?;
        let pitch = width * format.byte_size_per_pixel() as u32;

        let surface = Surface::from_data(&mut pixels, width, height, pitch, format)
            .map_err(ScreenshotError::Sdl)?;

        let path = self.directory.join(self.generate_filename());
        surface.save_bmp(&path).map_err(ScreenshotError::Sdl)?;

        self.taken += 1;
        Ok(path)
    }

    fn generate_filename(&self) -> String {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        screenshot_filename(&timestamp.to_string(), self.taken)
    }
}

/// File name for the `index`-th screenshot of a session taken at `timestamp`
///
/// The index keeps two captures within the same second apart.
pub fn screenshot_filename(timestamp: &str, index: u32) -> String {
    if index == 0 {
        format!("parallax_{}.bmp", timestamp)
    } else {
        format!("parallax_{}_{}.bmp", timestamp, index)
    }
}

#[derive(Debug)]
pub enum ScreenshotError {
    IoError(std::io::Error),
    Sdl(String),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::IoError(e) => write!(f, "IO error: {}", e),
            ScreenshotError::Sdl(msg) => write!(f, "SDL error: {}", msg),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<std::io::Error> for ScreenshotError {
    fn from(err: std::io::Error) -> Self {
        ScreenshotError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_first_capture() {
        assert_eq!(
            screenshot_filename("20240821_153000", 0),
            "parallax_20240821_153000.bmp"
        );
    }

    #[test]
    fn test_filename_later_captures_are_numbered() {
        assert_eq!(
            screenshot_filename("20240821_153000", 3),
            "parallax_20240821_153000_3.bmp"
        );
    }

    #[test]
    fn test_generated_filename_has_timestamp() {
        let manager = ScreenshotManager::new("shots");
        let name = manager.generate_filename();

        // parallax_ + YYYYMMDD_HHMMSS + .bmp
        assert!(name.starts_with("parallax_"));
        assert!(name.ends_with(".bmp"));
        assert_eq!(name.len(), "parallax_".len() + 15 + ".bmp".len());
        assert_eq!(manager.directory(), Path::new("shots"));
        assert_eq!(manager.taken(), 0);
    }
}
