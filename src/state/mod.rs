/// State management module
///
/// This module handles all application state:
/// - The user's current selection (selection.rs)
/// - Settings loaded from disk (settings.rs)
/// - Run bookkeeping and the displayed preview (session.rs)

pub mod selection;
pub mod session;
pub mod settings;
