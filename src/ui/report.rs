/// User-facing text for failed runs
use crate::pipeline::error::{ExecutionError, ResolveError, ValidationError};
use crate::pipeline::RunError;

/// Title and body of an error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: &'static str,
    pub body: String,
}

impl ErrorReport {
    fn new(title: &'static str, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// Show the report as a blocking native dialog
    pub fn show(&self) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(self.title)
            .set_description(self.body.as_str())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

pub fn describe(error: &RunError) -> ErrorReport {
    match error {
        RunError::Validation(error) => describe_validation(error),
        RunError::Execution(ExecutionError::Launch { program, reason }) => ErrorReport::new(
            "Launch error",
            format!(
                "Could not start '{}'. Check the path and its permissions.\n\n{reason}",
                program.display()
            ),
        ),
        RunError::Execution(ExecutionError::NonZeroExit { exit_code, stderr }) => ErrorReport::new(
            "Execution error",
            format!("The program failed with exit status {exit_code}.\n\nDetails:\n{stderr}"),
        ),
        RunError::Execution(ExecutionError::TimedOut { limit, stderr }) => ErrorReport::new(
            "Execution timed out",
            format!(
                "The program was stopped after {} seconds.\n\nDetails:\n{stderr}",
                limit.as_secs_f32()
            ),
        ),
        RunError::Resolve(ResolveError::MissingOutputArtifact { path }) => ErrorReport::new(
            "Missing output",
            format!(
                "The program finished but the output file '{}' was not found.",
                path.display()
            ),
        ),
        RunError::Decode(error) => ErrorReport::new(
            "Image display error",
            format!("Failed to display '{}'.\n{}", error.path.display(), error.reason),
        ),
        RunError::Worker(reason) => ErrorReport::new(
            "Unexpected error",
            format!("The run was interrupted: {reason}"),
        ),
    }
}

fn describe_validation(error: &ValidationError) -> ErrorReport {
    let body = match error {
        ValidationError::MissingExecutable => "No valid executable has been selected.",
        ValidationError::MissingInput => "No valid input image has been selected.",
        ValidationError::MissingParameter => "Please enter a parameter value.",
        ValidationError::EmptyParameter => "The parameter value is blank.",
        ValidationError::NotANumber => "The parameter value is not a number.",
        ValidationError::OutOfRange => {
            "The parameter value is out of range: thresholds must be 0-255 and sigma must be positive."
        }
    };
    ErrorReport::new("Invalid input", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::DecodeError;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::time::Duration;

    fn every_error() -> Vec<RunError> {
        vec![
            ValidationError::MissingExecutable.into(),
            ValidationError::MissingInput.into(),
            ValidationError::MissingParameter.into(),
            ValidationError::EmptyParameter.into(),
            ValidationError::NotANumber.into(),
            ValidationError::OutOfRange.into(),
            ExecutionError::Launch {
                program: PathBuf::from("/opt/filter"),
                reason: String::from("No such file or directory"),
            }
            .into(),
            ExecutionError::NonZeroExit {
                exit_code: 1,
                stderr: String::from("bad format"),
            }
            .into(),
            ExecutionError::TimedOut {
                limit: Duration::from_secs(5),
                stderr: String::new(),
            }
            .into(),
            ResolveError::MissingOutputArtifact {
                path: PathBuf::from("output.bmp"),
            }
            .into(),
            DecodeError {
                path: PathBuf::from("output.bmp"),
                reason: String::from("unexpected end of file"),
            }
            .into(),
            RunError::Worker(String::from("task cancelled")),
        ]
    }

    #[test]
    fn test_every_error_has_a_distinct_message() {
        let errors = every_error();
        let bodies: HashSet<String> = errors.iter().map(|e| describe(e).body).collect();
        assert_eq!(bodies.len(), errors.len());
    }

    #[test]
    fn test_execution_error_shows_stderr_verbatim() {
        let error: RunError = ExecutionError::NonZeroExit {
            exit_code: 1,
            stderr: String::from("bad format"),
        }
        .into();

        let report = describe(&error);

        assert_eq!(report.title, "Execution error");
        assert!(report.body.ends_with("Details:\nbad format"));
    }
}
