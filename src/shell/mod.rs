//! External command execution and login shell detection.

pub mod command;
pub mod platform;
pub mod recording;

pub use command::{execute, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use platform::ShellType;
pub use recording::RecordingRunner;
