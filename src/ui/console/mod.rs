use crate::debugger::{Address, Debugger};
use crate::error::Error;
use crate::remote::Transport;
use crate::ui::command::Command;
use crate::ui::console::editor::DGEditor;
use crate::ui::console::help::HELP;
use crate::ui::console::hook::TerminalHook;
use crate::ui::console::print::style::ErrorView;
use crate::ui::console::print::Printer;
use log::debug;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;

pub mod editor;
mod help;
pub mod hook;
pub mod print;

pub const PROMT: &str = "> ";

/// Line oriented source of user commands.
pub trait InputSource {
    /// Read next line, return `None` at the end of input.
    fn read_line(&mut self, promt: &str) -> anyhow::Result<Option<String>>;
}

impl InputSource for DGEditor {
    fn read_line(&mut self, promt: &str) -> anyhow::Result<Option<String>> {
        match self.readline(promt) {
            Ok(input) => {
                _ = self.add_history_entry(&input);
                Ok(Some(input))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Predefined list of commands, for non-interactive sessions.
#[derive(Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    consumed: usize,
}

impl ScriptedInput {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            consumed: 0,
        }
    }

    /// Return count of already read lines.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, _: &str) -> anyhow::Result<Option<String>> {
        let line = self.lines.pop_front();
        if line.is_some() {
            self.consumed += 1;
        }
        Ok(line)
    }
}

/// Interactive debug session: prompt loop over a [`Debugger`].
pub struct TerminalApplication<T: Transport, I: InputSource> {
    debugger: Debugger<T, TerminalHook>,
    input: I,
    printer: Printer,
}

impl<T: Transport, I: InputSource> TerminalApplication<T, I> {
    pub fn new(debugger: Debugger<T, TerminalHook>, input: I, printer: Printer) -> Self {
        Self {
            debugger,
            input,
            printer,
        }
    }

    /// Run prompt loop until `quit` command or end of input. Return input source back.
    ///
    /// Transport errors are fatal and stop the session.
    pub fn run(mut self) -> anyhow::Result<I> {
        self.debugger.print_line(Address::ENTRY)?;

        while let Some(input) = self.input.read_line(PROMT)? {
            let cmd = match Command::parse(&input) {
                Ok(cmd) => cmd,
                Err(e) => {
                    debug!(target: "debugger", "skip input `{input}`: {e}");
                    continue;
                }
            };

            match self.handle_command(cmd) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_fatal() => {
                    self.printer
                        .print(ErrorView::from(format!("fatal error: {e:#}")));
                    return Err(e.into());
                }
                Err(e) => {
                    self.printer.print(ErrorView::from(format!("error: {e:#}")));
                }
            }
        }

        Ok(self.input)
    }

    /// Handle a single command, return false if session must be finished.
    fn handle_command(&self, cmd: Command) -> Result<bool, Error> {
        match cmd {
            Command::Help => self.printer.print(HELP),
            Command::Quit => return Ok(false),
            Command::Run => {
                self.debugger.run_to_break()?;
            }
            Command::Step => {
                self.debugger.step()?;
            }
        }
        Ok(true)
    }
}
