/// Presentation layer
///
/// Widgets only: every decision about what is valid lives in `pipeline`.
/// - `controls.rs` - executable/input pickers, mode radios, parameter field, run button
/// - `histogram.rs` - canvas histogram under the preview
/// - `report.rs` - dialog text for each failure kind

pub mod controls;
pub mod histogram;
pub mod report;

use iced::widget::{canvas, column, container, image, text};
use iced::{Element, Length, Size};

use crate::pipeline::{BoundingBox, PreviewImage};
use crate::Message;
use histogram::Histogram;

/// Width of the control panel column
pub const CONTROLS_WIDTH: f32 = 300.0;
/// Outer padding of the window content
pub const PADDING: f32 = 10.0;
/// Gap between the control panel and the preview area
pub const SPACING: f32 = 20.0;
/// Height of the histogram strip under the preview
pub const HISTOGRAM_HEIGHT: f32 = 80.0;

/// Bounding box for a preview shown in a window of `window` size
pub fn preview_bounds(window: Size, margin: u32) -> BoundingBox {
    let margin = margin as f32;
    let width = window.width - CONTROLS_WIDTH - 2.0 * PADDING - SPACING - margin;
    let height = window.height - 2.0 * PADDING - HISTOGRAM_HEIGHT - PADDING - margin;
    BoundingBox::new(width.max(0.0) as u32, height.max(0.0) as u32)
}

/// The preview currently on screen.
///
/// Holds the image handle for as long as the preview is displayed.
#[derive(Debug, Clone)]
pub struct ShownPreview {
    pub handle: image::Handle,
    pub histogram: Histogram,
    pub width: u32,
    pub height: u32,
}

impl ShownPreview {
    pub fn new(preview: &PreviewImage) -> Self {
        Self {
            handle: image::Handle::from_rgba(
                preview.width(),
                preview.height(),
                preview.pixels().to_vec(),
            ),
            histogram: Histogram::from_rgba(preview.pixels()),
            width: preview.width(),
            height: preview.height(),
        }
    }
}

/// Right-hand side: the preview and its histogram, or a placeholder
pub fn preview_area(shown: Option<&ShownPreview>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match shown {
        Some(shown) => column![
            container(image(shown.handle.clone()))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            canvas(shown.histogram.clone())
                .width(Length::Fill)
                .height(Length::Fixed(HISTOGRAM_HEIGHT)),
        ]
        .spacing(PADDING)
        .into(),
        None => container(text("The result will be shown here"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(PADDING)
        .into()
}
