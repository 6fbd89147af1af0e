//! HBnB console - an interactive shell for HBnB domain objects
//!
//! Objects of a fixed set of classes (`User`, `Place`, `City`, ...) are
//! created, shown, updated and destroyed from a line-oriented prompt and
//! persisted to a JSONL file between sessions.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{ClassName, Instance};
pub use storage::{FileStorage, Storage};
