/// Left-hand control panel
use iced::widget::{button, column, radio, row, text, text_input, Column};
use iced::{Element, Length};

use super::CONTROLS_WIDTH;
use crate::pipeline::parameter;
use crate::state::selection::{Mode, Selection};
use crate::Message;

/// Extensions offered by the input image picker
pub const IMAGE_EXTENSIONS: [&str; 4] = ["bmp", "png", "jpg", "jpeg"];

pub fn view(selection: &Selection, running: bool) -> Element<'_, Message> {
    let executable = row![
        text_input("Path to filter program", &selection.executable.to_string_lossy())
            .on_input(Message::ExecutablePathChanged)
            .width(Length::Fill),
        button("Browse...").on_press(Message::PickExecutable),
    ]
    .spacing(5);

    let input = row![
        text_input("Path to input image", &selection.input_image.to_string_lossy())
            .on_input(Message::InputPathChanged)
            .width(Length::Fill),
        button("Browse...").on_press(Message::PickInputImage),
    ]
    .spacing(5);

    let modes = Column::with_children(Mode::ALL.iter().map(|&mode| {
        radio(
            mode.display_name(),
            mode,
            Some(selection.mode),
            Message::ModeSelected,
        )
        .into()
    }))
    .spacing(6);

    // The field is disabled (no input handler) for modes without a parameter
    let spec = parameter::spec(selection.mode);
    let mut parameter_input = text_input("", &selection.parameter).width(Length::Fixed(90.0));
    if spec.required {
        parameter_input = parameter_input.on_input(Message::ParameterChanged);
    }
    let parameter_row = row![text(spec.label), parameter_input]
        .spacing(8)
        .align_y(iced::Alignment::Center);

    let run_label = if running { "Running..." } else { "Run" };
    let run = button(text(run_label).size(18))
        .on_press_maybe((!running).then_some(Message::RunRequested))
        .padding(10)
        .width(Length::Fill);

    column![
        text("Step 1: Executable").size(14),
        executable,
        text("Step 2: Input image").size(14),
        input,
        text("Step 3: Processing").size(14),
        modes,
        text("Step 4: Parameter").size(14),
        parameter_row,
        run,
    ]
    .spacing(12)
    .width(Length::Fixed(CONTROLS_WIDTH))
    .into()
}
