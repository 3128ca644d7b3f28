/// Processing request controller
///
/// One run: build the invocation, execute it, find the output artifact and
/// render it. The first failure ends the run.
use super::error::RunError;
use super::executor::{ProcessRunner, StdProcessRunner};
use super::invocation;
use super::preview::{self, BoundingBox, PreviewImage};
use super::resolver::ResultResolver;
use crate::state::selection::Selection;

pub struct Controller<R = StdProcessRunner> {
    runner: R,
    resolver: ResultResolver,
}

impl<R: ProcessRunner> Controller<R> {
    pub fn new(runner: R, resolver: ResultResolver) -> Self {
        Self { runner, resolver }
    }

    /// Run the pipeline for a selection snapshot, blocking until it finishes
    pub fn run(&self, selection: Selection, bounds: BoundingBox) -> Result<PreviewImage, RunError> {
        let result = self.run_stages(&selection, bounds);
        if let Err(error) = &result {
            tracing::warn!(mode = %selection.mode, %error, "run failed");
        }
        result
    }

    fn run_stages(&self, selection: &Selection, bounds: BoundingBox) -> Result<PreviewImage, RunError> {
        let invocation = invocation::build(selection)?;
        tracing::info!("🚀 Running: {}", invocation.display());

        let output = self
            .runner
            .run(&invocation)
            .into_result(invocation.program())?;
        if !output.stdout.is_empty() || !output.stderr.is_empty() {
            tracing::debug!(
                stdout = %output.stdout.trim_end(),
                stderr = %output.stderr.trim_end(),
                "filter program output"
            );
        }
        let artifact = self.resolver.resolve()?;

        Ok(preview::render(&artifact, bounds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::{ExecutionError, ResolveError, ValidationError};
    use crate::pipeline::executor::ExecutionOutcome;
    use crate::pipeline::invocation::Invocation;
    use crate::state::selection::Mode;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Runner returning a canned outcome, optionally writing the artifact first
    struct FakeRunner {
        outcome: ExecutionOutcome,
        writes: Option<PathBuf>,
        calls: AtomicUsize,
    }

    impl FakeRunner {
        fn new(outcome: ExecutionOutcome) -> Self {
            Self {
                outcome,
                writes: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn writing(mut self, artifact: PathBuf) -> Self {
            self.writes = Some(artifact);
            self
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, _invocation: &Invocation) -> ExecutionOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(artifact) = &self.writes {
                image::RgbImage::new(64, 32).save(artifact).unwrap();
            }
            self.outcome.clone()
        }
    }

    fn exited(exit_code: i32, stderr: &str) -> ExecutionOutcome {
        ExecutionOutcome::Exited {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    fn valid_selection(dir: &Path) -> Selection {
        let executable = dir.join("filter");
        let input_image = dir.join("input.bmp");
        fs::write(&executable, b"").unwrap();
        image::RgbImage::new(8, 8).save(&input_image).unwrap();
        Selection {
            executable,
            input_image,
            mode: Mode::Binarize,
            parameter: String::from("128"),
        }
    }

    #[test]
    fn test_clean_exit_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("output.bmp");
        let controller = Controller::new(
            FakeRunner::new(exited(0, "")),
            ResultResolver::new(artifact.clone()),
        );

        let error = controller
            .run(valid_selection(dir.path()), BoundingBox::new(100, 100))
            .unwrap_err();

        assert_eq!(
            error,
            RunError::Resolve(ResolveError::MissingOutputArtifact { path: artifact })
        );
    }

    #[test]
    fn test_failed_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let controller = Controller::new(
            FakeRunner::new(exited(1, "bad format")),
            ResultResolver::new(dir.path().join("output.bmp")),
        );

        let error = controller
            .run(valid_selection(dir.path()), BoundingBox::new(100, 100))
            .unwrap_err();

        assert_eq!(
            error,
            RunError::Execution(ExecutionError::NonZeroExit {
                exit_code: 1,
                stderr: String::from("bad format"),
            })
        );
    }

    #[test]
    fn test_failed_exit_ignores_stale_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("output.bmp");
        let controller = Controller::new(
            FakeRunner::new(exited(2, "")).writing(artifact.clone()),
            ResultResolver::new(artifact),
        );

        let result = controller.run(valid_selection(dir.path()), BoundingBox::new(100, 100));

        assert!(matches!(
            result,
            Err(RunError::Execution(ExecutionError::NonZeroExit { exit_code: 2, .. }))
        ));
    }

    #[test]
    fn test_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let selection = valid_selection(dir.path());
        let controller = Controller::new(
            FakeRunner::new(ExecutionOutcome::FailedToLaunch {
                reason: String::from("permission denied"),
            }),
            ResultResolver::new(dir.path().join("output.bmp")),
        );

        let error = controller
            .run(selection.clone(), BoundingBox::new(100, 100))
            .unwrap_err();

        assert_eq!(
            error,
            RunError::Execution(ExecutionError::Launch {
                program: selection.executable,
                reason: String::from("permission denied"),
            })
        );
    }

    #[test]
    fn test_validation_failure_never_runs_program() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeRunner::new(exited(0, ""));
        let controller = Controller::new(runner, ResultResolver::new(dir.path().join("output.bmp")));
        let mut selection = valid_selection(dir.path());
        selection.parameter = String::from("256");

        let error = controller
            .run(selection, BoundingBox::new(100, 100))
            .unwrap_err();

        assert_eq!(error, RunError::Validation(ValidationError::OutOfRange));
        assert_eq!(controller.runner.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_run_with_fake_runner() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("output.bmp");
        let controller = Controller::new(
            FakeRunner::new(exited(0, "")).writing(artifact.clone()),
            ResultResolver::new(artifact),
        );

        let preview = controller
            .run(valid_selection(dir.path()), BoundingBox::new(32, 32))
            .unwrap();

        assert_eq!((preview.width(), preview.height()), (32, 16));
    }

    #[test]
    fn test_corrupt_artifact_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("output.bmp");
        fs::write(&artifact, b"BM but not really").unwrap();
        let controller = Controller::new(
            FakeRunner::new(exited(0, "")),
            ResultResolver::new(artifact),
        );

        let error = controller
            .run(valid_selection(dir.path()), BoundingBox::new(32, 32))
            .unwrap_err();

        assert!(matches!(error, RunError::Decode(_)));
    }

    /// Stub filter: `/bin/sh binarize <input> <threshold>` copies the input to output.bmp
    #[cfg(unix)]
    fn stub_controller(dir: &Path) -> (Controller, Selection) {
        fs::write(dir.join("binarize"), "cp \"$1\" output.bmp\n").unwrap();
        let input_image = dir.join("input.bmp");
        image::RgbImage::from_fn(400, 200, |x, y| image::Rgb([(x % 256) as u8, (y % 256) as u8, 0]))
            .save(&input_image)
            .unwrap();

        let controller = Controller::new(
            StdProcessRunner::new(dir.to_path_buf()),
            ResultResolver::new(dir.join("output.bmp")),
        );
        let selection = Selection {
            executable: PathBuf::from("/bin/sh"),
            input_image,
            mode: Mode::Binarize,
            parameter: String::from("128"),
        };
        (controller, selection)
    }

    #[cfg(unix)]
    #[test]
    fn test_end_to_end_with_stub_program() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, selection) = stub_controller(dir.path());

        let preview = controller
            .run(selection, BoundingBox::new(200, 200))
            .unwrap();

        assert_eq!(preview.source_size(), (400, 200));
        assert_eq!((preview.width(), preview.height()), (200, 100));
    }

    #[cfg(unix)]
    #[test]
    fn test_identical_runs_give_identical_previews() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, selection) = stub_controller(dir.path());
        let bounds = BoundingBox::new(150, 150);

        let first = controller.run(selection.clone(), bounds).unwrap();
        let second = controller.run(selection, bounds).unwrap();

        assert_eq!(
            (first.width(), first.height()),
            (second.width(), second.height())
        );
        assert_eq!(first, second);
    }
}
