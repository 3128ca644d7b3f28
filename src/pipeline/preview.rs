/// Preview renderer
///
/// Decodes the output artifact and scales it down to fit the display area.
use image::{imageops::FilterType, ImageReader};
use std::fmt;
use std::path::Path;

use super::error::DecodeError;

/// Largest size a preview may take on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Bounding box of at least 1x1
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Largest size with the aspect ratio of `width`x`height` that fits.
    /// Images already inside the box keep their size.
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        if width <= self.width && height <= self.height {
            return (width, height);
        }

        let scale = f64::min(
            f64::from(self.width) / f64::from(width),
            f64::from(self.height) / f64::from(height),
        );
        let fitted_width = (f64::from(width) * scale).round() as u32;
        let fitted_height = (f64::from(height) * scale).round() as u32;

        (
            fitted_width.clamp(1, self.width),
            fitted_height.clamp(1, self.height),
        )
    }
}

/// Display-ready RGBA bitmap
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    width: u32,
    height: u32,
    source_width: u32,
    source_height: u32,
    pixels: Vec<u8>,
}

impl PreviewImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the decoded artifact before scaling
    pub fn source_size(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// RGBA8 pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("source_width", &self.source_width)
            .field("source_height", &self.source_height)
            .finish_non_exhaustive()
    }
}

/// Decode `path` and fit it inside `bounds` using Lanczos resampling
pub fn render(path: &Path, bounds: BoundingBox) -> Result<PreviewImage, DecodeError> {
    let decode_error = |reason: String| DecodeError {
        path: path.to_path_buf(),
        reason,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?;

    let (source_width, source_height) = (img.width(), img.height());
    let (width, height) = bounds.fit(source_width, source_height);

    let scaled = if (width, height) == (source_width, source_height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    tracing::info!(
        "🖼️  Preview {}x{} from {}x{} ({})",
        width,
        height,
        source_width,
        source_height,
        path.display()
    );

    Ok(PreviewImage {
        width,
        height,
        source_width,
        source_height,
        pixels: scaled.to_rgba8().into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let bounds = BoundingBox::new(100, 100);
        assert_eq!(bounds.fit(400, 200), (100, 50));
        assert_eq!(bounds.fit(100, 400), (25, 100));
    }

    #[test]
    fn test_fit_never_upscales() {
        let bounds = BoundingBox::new(800, 600);
        assert_eq!(bounds.fit(50, 30), (50, 30));
        assert_eq!(bounds.fit(800, 600), (800, 600));
    }

    #[test]
    fn test_fit_keeps_thin_images_visible() {
        let bounds = BoundingBox::new(10, 10);
        assert_eq!(bounds.fit(1000, 3), (10, 1));
    }

    #[test]
    fn test_zero_sized_box_is_clamped() {
        let bounds = BoundingBox::new(0, 0);
        assert_eq!((bounds.width, bounds.height), (1, 1));
        assert_eq!(bounds.fit(640, 480), (1, 1));
    }

    #[test]
    fn test_render_scales_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bmp");
        RgbImage::from_fn(320, 160, |x, _| Rgb([(x % 256) as u8, 0, 0]))
            .save(&path)
            .unwrap();

        let preview = render(&path, BoundingBox::new(160, 160)).unwrap();

        assert_eq!((preview.width(), preview.height()), (160, 80));
        assert_eq!(preview.source_size(), (320, 160));
        assert_eq!(preview.pixels().len(), 160 * 80 * 4);
    }

    #[test]
    fn test_render_small_image_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bmp");
        RgbImage::from_pixel(4, 2, Rgb([10, 20, 30])).save(&path).unwrap();

        let preview = render(&path, BoundingBox::new(100, 100)).unwrap();

        assert_eq!((preview.width(), preview.height()), (4, 2));
        assert_eq!(&preview.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_render_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bmp");
        std::fs::write(&path, b"definitely not a bitmap").unwrap();

        let error = render(&path, BoundingBox::new(100, 100)).unwrap_err();

        assert_eq!(error.path, path);
        assert!(!error.reason.is_empty());
    }

    #[test]
    fn test_render_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(render(&dir.path().join("gone.bmp"), BoundingBox::new(10, 10)).is_err());
    }
}
