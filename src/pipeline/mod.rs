/// Processing request pipeline
///
/// Turns a selection into a preview, one stage at a time:
/// - `parameter.rs` - per-mode parameter policy
/// - `invocation.rs` - selection to command line
/// - `executor.rs` - runs the external filter program
/// - `resolver.rs` - locates the output artifact
/// - `preview.rs` - decodes and scales the artifact
/// - `controller.rs` - chains the stages, stopping at the first error

pub mod controller;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod parameter;
pub mod preview;
pub mod resolver;

pub use controller::Controller;
pub use error::RunError;
pub use preview::{BoundingBox, PreviewImage};
