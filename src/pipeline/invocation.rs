/// Invocation builder
///
/// Maps a selection snapshot onto the command line of the external program:
/// `<executable> <mode> <input> [<parameter>]`.
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::error::ValidationError;
use super::parameter;
use crate::state::selection::Selection;

/// Program and ordered arguments for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Command line for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build the invocation for `selection`, or report why it cannot run
pub fn build(selection: &Selection) -> Result<Invocation, ValidationError> {
    if !is_present(&selection.executable) {
        return Err(ValidationError::MissingExecutable);
    }
    if !is_present(&selection.input_image) {
        return Err(ValidationError::MissingInput);
    }

    let mut args = vec![
        OsString::from(selection.mode.as_arg()),
        selection.input_image.clone().into_os_string(),
    ];

    if parameter::spec(selection.mode).required && selection.parameter.is_empty() {
        return Err(ValidationError::MissingParameter);
    }
    if let Some(value) = parameter::validate(selection.mode, &selection.parameter)? {
        args.push(OsString::from(value.to_string()));
    }

    Ok(Invocation {
        program: selection.executable.clone(),
        args,
    })
}

fn is_present(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.exists()
}
