//! Terminal front end for the selection coordinator: a text presenter,
//! operator command parsing, and the mapping from loaded configuration to
//! coordinator settings.

pub mod commands;
pub mod settings;
pub mod terminal;

pub use commands::{Line, LineError, forward_commands, parse_line};
pub use settings::{backend_config, coordinator_settings};
pub use terminal::TerminalPresenter;
