use iced::widget::{column, container, row, text};
use iced::{window, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod pipeline;
mod state;
mod ui;

use pipeline::executor::StdProcessRunner;
use pipeline::resolver::ResultResolver;
use pipeline::{BoundingBox, Controller, PreviewImage, RunError};
use state::selection::{Mode, Selection};
use state::session::Session;
use state::settings::Settings;

/// Initial window size
const WINDOW_SIZE: Size = Size {
    width: 850.0,
    height: 600.0,
};

/// Main application state
struct FilterFront {
    settings: Settings,
    /// Shared with the background worker for each run
    controller: Arc<Controller>,
    session: Session,
    /// Image handle kept alive while the preview is on screen
    shown: Option<ui::ShownPreview>,
    window_size: Size,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    ExecutablePathChanged(String),
    InputPathChanged(String),
    PickExecutable,
    PickInputImage,
    ModeSelected(Mode),
    ParameterChanged(String),
    /// User clicked "Run"
    RunRequested,
    /// Background run finished
    RunFinished(Result<PreviewImage, RunError>),
    WindowResized(Size),
}

impl FilterFront {
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load().unwrap_or_else(|error| {
            tracing::warn!(%error, "falling back to default settings");
            Settings::default()
        });

        let working_dir = settings.resolve_working_dir().unwrap_or_else(|error| {
            tracing::warn!(%error, "cannot determine working directory, using '.'");
            PathBuf::from(".")
        });

        let runner = StdProcessRunner::new(working_dir.clone()).with_timeout(settings.timeout());
        let resolver = ResultResolver::new(settings.artifact_path(&working_dir));
        tracing::info!(
            "🎨 Filter front initialized; working dir {}, output artifact {}",
            working_dir.display(),
            resolver.artifact().display()
        );

        let session = Session::new(Selection::with_parameter(settings.default_parameter.clone()));

        (
            FilterFront {
                settings,
                controller: Arc::new(Controller::new(runner, resolver)),
                session,
                shown: None,
                window_size: WINDOW_SIZE,
                status: String::from("Ready."),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ExecutablePathChanged(path) => {
                self.session.selection.executable = PathBuf::from(path);
            }
            Message::InputPathChanged(path) => {
                self.session.selection.input_image = PathBuf::from(path);
            }
            Message::PickExecutable => {
                if let Some(path) = FileDialog::new()
                    .set_title("Select the filter program")
                    .pick_file()
                {
                    self.session.selection.executable = path;
                }
            }
            Message::PickInputImage => {
                if let Some(path) = FileDialog::new()
                    .set_title("Select an image")
                    .add_filter("BMP/PNG/JPG", &ui::controls::IMAGE_EXTENSIONS)
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.session.selection.input_image = path;
                }
            }
            Message::ModeSelected(mode) => {
                self.session.selection.mode = mode;
            }
            Message::ParameterChanged(text) => {
                self.session.selection.parameter = text;
            }
            Message::RunRequested => {
                let Some(selection) = self.session.request_run() else {
                    tracing::debug!("run already in flight, ignoring request");
                    return Task::none();
                };

                self.status = format!("Running {}...", selection.mode.display_name());
                let bounds = ui::preview_bounds(self.window_size, self.settings.preview_margin);

                return Task::perform(
                    run_in_background(Arc::clone(&self.controller), selection, bounds),
                    Message::RunFinished,
                );
            }
            Message::RunFinished(result) => {
                let report = result.as_ref().err().map(ui::report::describe);

                if self.session.complete_run(result) {
                    self.shown = self.session.preview().map(ui::ShownPreview::new);
                    if let Some(shown) = &self.shown {
                        self.status = format!("✅ Done. Preview {}x{}.", shown.width, shown.height);
                    }
                }

                if let Some(report) = report {
                    self.status = format!("❌ {}", report.title);
                    report.show();
                }
            }
            Message::WindowResized(size) => {
                self.window_size = size;
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut controls = column![
            ui::controls::view(&self.session.selection, self.session.is_running()),
            text(&self.status).size(14),
        ]
        .spacing(ui::PADDING);

        if let Some(error) = self.session.last_error() {
            controls = controls.push(
                text(ui::report::describe(error).body)
                    .size(12)
                    .width(Length::Fixed(ui::CONTROLS_WIDTH)),
            );
        }

        let content = row![controls, ui::preview_area(self.shown.as_ref())].spacing(ui::SPACING);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(ui::PADDING)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Run the pipeline on a blocking worker so the window stays responsive
async fn run_in_background(
    controller: Arc<Controller>,
    selection: Selection,
    bounds: BoundingBox,
) -> Result<PreviewImage, RunError> {
    tokio::task::spawn_blocking(move || controller.run(selection, bounds))
        .await
        .unwrap_or_else(|e| Err(RunError::Worker(e.to_string())))
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application("Filter Front", FilterFront::update, FilterFront::view)
        .subscription(FilterFront::subscription)
        .theme(FilterFront::theme)
        .window_size(WINDOW_SIZE)
        .centered()
        .run_with(FilterFront::new)
}
