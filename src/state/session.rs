use crate::pipeline::{PreviewImage, RunError};
use super::selection::Selection;

/// Live selection plus the result of the most recent run.
///
/// At most one run is in flight. A failed run leaves the previous preview in place.
#[derive(Debug, Default)]
pub struct Session {
    pub selection: Selection,
    in_flight: bool,
    preview: Option<PreviewImage>,
    last_error: Option<RunError>,
}

impl Session {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    /// Snapshot of the selection for a new run, or `None` while one is running
    pub fn request_run(&mut self) -> Option<Selection> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(self.selection.clone())
    }

    /// Record a finished run. Returns `true` when the preview was replaced.
    pub fn complete_run(&mut self, result: Result<PreviewImage, RunError>) -> bool {
        self.in_flight = false;
        match result {
            Ok(preview) => {
                self.preview = Some(preview);
                self.last_error = None;
                true
            }
            Err(error) => {
                self.last_error = Some(error);
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn last_error(&self) -> Option<&RunError> {
        self.last_error.as_ref()
    }
}
