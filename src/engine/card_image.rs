use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use log::{debug, warn};

use crate::error::SheetError;
use crate::infra::config::SheetConfig;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// A source image normalized to the exact raster size of one card.
#[derive(Debug, Clone)]
pub struct CardImage {
    pub source: PathBuf,
    pub pixels: RgbImage,
}

impl CardImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub enum CardOutcome {
    Ready(CardImage),
    Skipped(SkippedCard),
}

/// Loads and normalizes one image. Failures are reported, not propagated.
pub fn normalize_card(path: &Path, config: &SheetConfig) -> CardOutcome {
    match load_card(path, config) {
        Ok(card) => {
            debug!(
                "normalized {} to {}x{}",
                path.display(),
                card.width(),
                card.height()
            );
            CardOutcome::Ready(card)
        }
        Err(error) => {
            warn!("skipping {}: {error}", path.display());
            CardOutcome::Skipped(SkippedCard {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })
        }
    }
}

pub fn load_card(path: &Path, config: &SheetConfig) -> Result<CardImage, SheetError> {
    let (width, height) = config.card_pixel_size();
    if width == 0 || height == 0 {
        return Err(SheetError::InvalidInput(format!(
            "card raster size {width}x{height} is empty at {} dpi",
            config.dpi
        )));
    }

    let image = ImageReader::open(path)
        .map_err(|error| SheetError::Io(format!("failed to open {:?}: {error}", path)))?
        .with_guessed_format()
        .map_err(|error| SheetError::Decode(format!("failed to detect format {:?}: {error}", path)))?
        .decode()
        .map_err(|error| SheetError::Decode(format!("failed to decode {:?}: {error}", path)))?;

    Ok(CardImage {
        source: path.to_path_buf(),
        pixels: fit_to_card(&image, width, height),
    })
}

/// Scales `image` to cover the box, crops the overflow around the center and
/// pads any remainder with white so the result is exactly `width` x `height`.
pub fn fit_to_card(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let fitted = rgb.resize_to_fill(width, height, FilterType::Lanczos3).to_rgb8();

    if fitted.dimensions() == (width, height) {
        return fitted;
    }

    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    let x = (i64::from(width) - i64::from(fitted.width())) / 2;
    let y = (i64::from(height) - i64::from(fitted.height())) / 2;
    imageops::overlay(&mut canvas, &fitted, x, y);
    canvas
}
