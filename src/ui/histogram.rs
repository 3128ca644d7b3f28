/// Luminance histogram of the displayed preview
/// Helps pick a binarization threshold for the next run
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle};

use crate::Message;

/// 256-bin luminance histogram
#[derive(Debug, Clone)]
pub struct Histogram {
    pub bins: [u32; 256],
}

impl Histogram {
    /// Count Rec. 601 luma of RGBA8 pixels
    pub fn from_rgba(pixels: &[u8]) -> Self {
        let mut bins = [0u32; 256];
        for px in pixels.chunks_exact(4) {
            let luma = (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2])) / 1000;
            bins[luma as usize] += 1;
        }
        Self { bins }
    }
}

impl canvas::Program<Message> for Histogram {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let max_value = self.bins.iter().copied().max().unwrap_or(0) as f32;
        if max_value < 1.0 {
            return vec![frame.into_geometry()];
        }

        let height = bounds.height;
        let bar_width = bounds.width / 256.0;

        let mut path_builder = canvas::path::Builder::new();
        for (i, &count) in self.bins.iter().enumerate() {
            if count > 0 {
                let bar_height = count as f32 / max_value * height;
                let x = i as f32 * bar_width;

                path_builder.move_to(Point::new(x, height));
                path_builder.line_to(Point::new(x, height - bar_height));
            }
        }

        let path: Path = path_builder.build();
        frame.stroke(
            &path,
            Stroke::default()
                .with_color(Color::from_rgba(0.85, 0.85, 0.85, 0.8))
                .with_width(bar_width.max(1.0)),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_image_fills_two_bins() {
        let pixels = [
            0, 0, 0, 255, //
            255, 255, 255, 255, //
            255, 255, 255, 255, //
        ];
        let histogram = Histogram::from_rgba(&pixels);

        assert_eq!(histogram.bins[0], 1);
        assert_eq!(histogram.bins[255], 2);
        assert_eq!(histogram.bins.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_luma_weights() {
        let histogram = Histogram::from_rgba(&[255, 0, 0, 255]);
        // 0.299 * 255
        assert_eq!(histogram.bins[76], 1);
    }
}
