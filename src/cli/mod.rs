//! # Command-Line Interface
//!
//! The interactive console and its command handlers.
//!
//! ## Commands
//!
//! | Command | Purpose | Example |
//! |---------|---------|---------|
//! | `create` | Create an instance | `create User name="Betty" age=23` |
//! | `show` | Print one instance | `show User <id>` |
//! | `destroy` | Delete an instance | `destroy User <id>` |
//! | `all` | Print all instances | `all`, `all User` |
//! | `count` | Count instances of a class | `count User` |
//! | `update` | Set one attribute | `update User <id> email "a@b.com"` |
//! | `help` | Command help | `help update` |
//! | `quit` / `EOF` | Leave the console | `quit` |
//!
//! ## Dotted Calls
//!
//! `<Class>.all()`, `<Class>.count()`, `<Class>.show(<id>)`,
//! `<Class>.destroy(<id>)` and `<Class>.update(<id>, ...)` are aliases for
//! the commands above. See [`dotted`].
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logging on stderr:
//! ```bash
//! hbnb --verbose < commands.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the console.

mod app;
pub mod commands;
mod console;
pub mod dotted;
mod output;
pub mod tokens;

pub use app::{run, Cli};
pub use commands::CommandError;
pub use console::{Console, Flow, DEFAULT_PROMPT};
pub use output::Output;
