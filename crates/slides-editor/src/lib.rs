pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod keybinds;
pub mod outline;

pub use command::{Applied, Command};
pub use config::{EditMode, EditorConfig};
pub use editor::SlideEditor;
pub use error::EditError;
pub use keybinds::{Action, InputMode};
pub use outline::{Outline, OutlineRow};
