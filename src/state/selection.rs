/// The user's current choices
///
/// The live copy is edited by the control panel. A run takes a clone of it,
/// so nothing the user types while a run is in flight can leak into that run.
use std::fmt;
use std::path::PathBuf;

/// Image-processing operation understood by the external program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Binarize,
    Smooth,
    EdgeDetect,
    Laplacian,
    Log,
}

impl Mode {
    /// Every mode, in the order the control panel lists them
    pub const ALL: [Mode; 5] = [
        Mode::Binarize,
        Mode::Smooth,
        Mode::EdgeDetect,
        Mode::Laplacian,
        Mode::Log,
    ];

    /// The word passed to the external program as its first argument
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::Binarize => "binarize",
            Self::Smooth => "smooth",
            Self::EdgeDetect => "edge",
            Self::Laplacian => "laplacian",
            Self::Log => "log",
        }
    }

    /// Human-readable name for the mode picker
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Binarize => "Binarize",
            Self::Smooth => "Smooth",
            Self::EdgeDetect => "Edge detection",
            Self::Laplacian => "Laplacian",
            Self::Log => "LoG filter",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Executable, input image, mode and parameter text as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// External filter program (empty until picked)
    pub executable: PathBuf,
    /// Image handed to the filter program
    pub input_image: PathBuf,
    pub mode: Mode,
    /// Raw parameter text; only meaningful for modes that take one
    pub parameter: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self::with_parameter("128")
    }
}

impl Selection {
    /// Empty selection with the given initial parameter text
    pub fn with_parameter(parameter: impl Into<String>) -> Self {
        Self {
            executable: PathBuf::new(),
            input_image: PathBuf::new(),
            mode: Mode::default(),
            parameter: parameter.into(),
        }
    }
}
