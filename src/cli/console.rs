//! Interactive command loop
//!
//! Reads one command per line, dispatches it and prints at most one reply
//! or diagnostic line per handler call. Diagnostics never end the loop;
//! only `quit`, `EOF` or end of input do.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::commands::{self, CommandError, CommandResult};
use super::dotted::{self, DottedCall};
use super::output::Output;
use super::tokens::{shell_split, split_raw};
use crate::storage::Storage;

pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Create,
    Show,
    Destroy,
    All,
    Count,
    Update,
    Quit,
    Eof,
    Help,
}

impl Command {
    /// Listed by `help`, sorted by name
    const DOCUMENTED: [Command; 9] = [
        Command::Eof,
        Command::All,
        Command::Count,
        Command::Create,
        Command::Destroy,
        Command::Help,
        Command::Quit,
        Command::Show,
        Command::Update,
    ];

    fn lookup(name: &str) -> Option<Self> {
        Self::DOCUMENTED.into_iter().find(|cmd| cmd.name() == name)
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Show => "show",
            Command::Destroy => "destroy",
            Command::All => "all",
            Command::Count => "count",
            Command::Update => "update",
            Command::Quit => "quit",
            Command::Eof => "EOF",
            Command::Help => "help",
        }
    }

    fn help(&self) -> &'static [&'static str] {
        match self {
            Command::Create => &[
                "Creates an instance of a class, printing its id",
                "[Usage]: create <className> [<key>=<value> ...]",
                "",
            ],
            Command::Show => &[
                "Shows an individual instance of a class",
                "[Usage]: show <className> <objectId>",
                "",
            ],
            Command::Destroy => &[
                "Destroys an individual instance of a class",
                "[Usage]: destroy <className> <objectId>",
                "",
            ],
            Command::All => &[
                "Shows all objects, or all of a class",
                "[Usage]: all [<className>]",
                "",
            ],
            Command::Count => &[
                "Counts the instances of a class",
                "[Usage]: count <className>",
                "",
            ],
            Command::Update => &[
                "Updates an object with new information",
                "[Usage]: update <className> <objectId> <attName> <attVal>",
                "",
            ],
            Command::Quit => &["Exits the program with formatting", ""],
            Command::Eof => &["Exits the program without formatting", ""],
            Command::Help => &[
                "List available commands with \"help\" or detailed help with \"help cmd\".",
            ],
        }
    }
}

/// The console: a storage context plus an output stream
pub struct Console<S: Storage, W: Write> {
    storage: S,
    output: Output<W>,
    prompt: String,
}

impl<S: Storage, W: Write> Console<S, W> {
    pub fn new(storage: S, output: Output<W>) -> Self {
        Self {
            storage,
            output,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Replaces the interactive prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the console, returning the output writer
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    /// Runs until `quit`, `EOF` or end of input, then flushes storage.
    ///
    /// The prompt is only printed when `interactive` is set.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> Result<()> {
        let mut line = String::new();

        loop {
            if interactive {
                self.output.prompt(&self.prompt)?;
            }

            line.clear();
            let read = input
                .read_line(&mut line)
                .context("Failed to read command")?;

            if read == 0 {
                tracing::debug!("End of input");
                self.output.blank()?;
                break;
            }

            if self.execute(&line)? == Flow::Exit {
                break;
            }
        }

        self.output.flush()?;
        self.storage
            .save()
            .context("Failed to flush storage on exit")
    }

    /// Executes a single command line
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(topic) = line.strip_prefix('?') {
            self.help(topic.trim())?;
            return Ok(Flow::Continue);
        }

        let (word, args) = split_command(line);
        match Command::lookup(word) {
            Some(command) => {
                tracing::debug!(command = command.name(), args = %args, "Dispatching");
                self.dispatch(command, args)
            }
            None => {
                tracing::debug!(line = %line, "Trying dotted call");
                self.dotted(line)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: Command, args: &str) -> Result<Flow> {
        let result = match command {
            Command::Create => commands::create(&mut self.storage, &split_raw(args)),
            Command::Show => commands::show(&self.storage, &shell_split(args)),
            Command::Destroy => commands::destroy(&mut self.storage, &shell_split(args)),
            Command::All => commands::all(&self.storage, &shell_split(args)),
            Command::Count => commands::count(&self.storage, &shell_split(args)),
            Command::Update => commands::update(&mut self.storage, &shell_split(args)),
            Command::Help => {
                self.help(args)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Exit),
            Command::Eof => {
                self.output.blank()?;
                return Ok(Flow::Exit);
            }
        };

        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn dotted(&mut self, line: &str) -> Result<()> {
        let Some(call) = dotted::parse(line) else {
            return self.report(Err(CommandError::UnknownSyntax(line.to_string())));
        };

        let result = match call {
            DottedCall::All(tokens) => commands::all(&self.storage, &tokens),
            DottedCall::Count(tokens) => commands::count(&self.storage, &tokens),
            DottedCall::Show(tokens) => commands::show(&self.storage, &tokens),
            DottedCall::Destroy(tokens) => commands::destroy(&mut self.storage, &tokens),
            DottedCall::Update(tokens) => commands::update(&mut self.storage, &tokens),
            DottedCall::UpdateDict { target, entries } => {
                for (name, value) in entries {
                    let result = commands::update_value(&mut self.storage, &target, &name, value);
                    self.report(result)?;
                }
                return Ok(());
            }
        };

        self.report(result)
    }

    fn help(&mut self, topic: &str) -> Result<()> {
        if topic.is_empty() {
            let header = "Documented commands (type help <topic>):";
            let names: Vec<&str> = Command::DOCUMENTED.iter().map(Command::name).collect();

            self.output.blank()?;
            self.output.line(header)?;
            self.output.line(&"=".repeat(header.len()))?;
            self.output.line(&names.join("  "))?;
            self.output.blank()?;
            return Ok(());
        }

        match Command::lookup(topic) {
            Some(command) => {
                for line in command.help() {
                    self.output.line(line)?;
                }
            }
            None => self.output.line(&format!("*** No help on {}", topic))?,
        }
        Ok(())
    }

    fn report(&mut self, result: CommandResult) -> Result<()> {
        match result {
            Ok(Some(reply)) => self.output.line(&reply)?,
            Ok(None) => {}
            Err(CommandError::Storage(err)) => {
                tracing::error!("Failed to persist storage: {:#}", err);
            }
            Err(diagnostic) => self.output.line(&diagnostic.to_string())?,
        }
        Ok(())
    }
}

/// Splits a line into its leading command word and the trimmed remainder
fn split_command(line: &str) -> (&str, &str) {
    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    (&line[..end], line[end..].trim())
}
