mod navigator;
mod output;

pub use navigator::{NavigationEvent, Navigator, RecordingNavigator, TerminalNavigator};
pub use output::{display_download, display_error, display_response, display_session};
