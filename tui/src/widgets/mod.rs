//! Widgets for the chat panel surface

pub mod input_box;
pub mod message_log;
pub mod sidebar;
pub mod viewer;

pub use input_box::{InputBox, InputState, SPINNER_FRAMES};
pub use message_log::{MessageLog, MessageLogState};
pub use sidebar::Sidebar;
pub use viewer::ViewerPane;
