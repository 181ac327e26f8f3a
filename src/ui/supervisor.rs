use crate::debugger::{map, Address, Debugger};
use crate::error::Error;
use crate::muted_error;
use crate::remote::{Message, Tag, Transport};
use crate::toolchain::{self, Toolchain};
use crate::ui::console::editor::create_editor;
use crate::ui::console::hook::TerminalHook;
use crate::ui::console::print::style::{AddressView, KeywordView};
use crate::ui::console::print::Printer;
use crate::ui::console::{InputSource, TerminalApplication, PROMT};
use anyhow::Context;
use log::info;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Instruction appended to evaluated code, so the simulator halts at its end.
const EVAL_TERMINATOR: &str = "brk";

/// User requested action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Build source and start it in simulator.
    Start(PathBuf),
    /// Build source, load it into simulator and start interactive debug session.
    Debug(PathBuf),
    /// Same as [`Action::Debug`] but for a code snippet, `;` separates lines.
    Eval(String),
    /// Send a bare command.
    Trigger(Tag),
}

impl Action {
    /// Return true if action requires translator.
    pub fn needs_toolchain(&self) -> bool {
        !matches!(self, Action::Trigger(_))
    }
}

/// Source file created for a code snippet, removed together with its artifacts at drop.
pub struct ScratchSource {
    path: PathBuf,
}

impl ScratchSource {
    pub fn new(code: &str) -> anyhow::Result<Self> {
        let path = env::temp_dir().join(format!("digasm-{}.asm", uuid::Uuid::new_v4()));
        fs::write(&path, snippet_source(code))
            .with_context(|| format!("write {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchSource {
    fn drop(&mut self) {
        let image = toolchain::image_path(&self.path);
        let map = map::map_path(&self.path);
        for file in [self.path.as_path(), image.as_path(), map.as_path()] {
            if file.exists() {
                _ = muted_error!(fs::remove_file(file));
            }
        }
    }
}

/// Turn one-line snippet into a program source.
fn snippet_source(code: &str) -> String {
    format!("{}\n{EVAL_TERMINATOR}", code.replace(';', "\n"))
}

/// Supervisor builds programs, sends commands to the simulator and runs debug sessions.
pub struct Supervisor<T: Transport> {
    transport: T,
    toolchain: Option<Toolchain>,
    printer: Printer,
}

impl<T: Transport> Supervisor<T> {
    pub fn new(transport: T, toolchain: Option<Toolchain>, printer: Printer) -> Self {
        Self {
            transport,
            toolchain,
            printer,
        }
    }

    /// Execute action, debug sessions read commands from the terminal.
    pub fn run(self, action: Action) -> anyhow::Result<()> {
        match action {
            Action::Debug(_) | Action::Eval(_) => {
                let editor = create_editor(PROMT)?;
                self.run_with_input(action, editor)?;
            }
            _ => self.run_with_input(action, ())?,
        }
        Ok(())
    }

    /// Execute action, debug sessions read commands from `input`.
    pub fn run_with_input<I: InputSource>(self, action: Action, input: I) -> anyhow::Result<()> {
        match action {
            Action::Start(file) => {
                let toolchain = self.toolchain()?;
                let artifacts = toolchain.build(&file).context("Build image")?;
                let reply = self.send(Tag::Start, Some(&artifacts.image))?;
                self.print_reply(Tag::Start, reply)?;
            }
            Action::Debug(file) => {
                self.debug(&file, input)?;
            }
            Action::Eval(code) => {
                let source = ScratchSource::new(&code)?;
                self.debug(source.path(), input)?;
            }
            Action::Trigger(tag) => {
                let reply = self.transport.send(tag, None)?;
                self.print_reply(tag, reply)?;
            }
        }
        Ok(())
    }

    fn toolchain(&self) -> Result<&Toolchain, Error> {
        self.toolchain
            .as_ref()
            .ok_or(Error::ToolchainNotConfigured(toolchain::JAR_ENV))
    }

    fn send(&self, tag: Tag, image: Option<&Path>) -> Result<Option<Message>, Error> {
        let image = image.map(|p| p.to_string_lossy());
        self.transport.send(tag, image.as_deref())
    }

    fn debug<I: InputSource>(self, file: &Path, input: I) -> anyhow::Result<()> {
        let toolchain = self.toolchain()?;
        let artifacts = toolchain.build(file).context("Build image")?;
        self.send(Tag::Debug, Some(&artifacts.image))?;

        let debugger = Debugger::new(
            &artifacts.source,
            self.transport,
            TerminalHook::new(self.printer.clone()),
        )
        .context("Load debug information")?;

        info!(target: "debugger", "debug session for {}", artifacts.source.display());
        TerminalApplication::new(debugger, input, self.printer).run()?;
        Ok(())
    }

    fn print_reply(&self, tag: Tag, reply: Option<Message>) -> Result<(), Error> {
        let Some(reply) = reply else {
            return Ok(());
        };

        match reply.argument {
            Some(arg) if tag.expects_address() => {
                let addr: Address = arg.parse()?;
                self.printer.print(AddressView::from(addr));
            }
            Some(arg) => self.printer.print(arg),
            None => self.printer.print(KeywordView::from(reply.tag)),
        }
        Ok(())
    }
}

/// Sessions without interactive debugger have nothing to read.
impl InputSource for () {
    fn read_line(&mut self, _: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}
