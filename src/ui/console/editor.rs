use crate::ui::command::parser::{
    HELP_COMMAND, HELP_COMMAND_SHORT, QUIT_COMMAND, QUIT_COMMAND_SHORT, RUN_COMMAND,
    RUN_COMMAND_SHORT, STEP_COMMAND, STEP_COMMAND_SHORT,
};
use crossterm::style::{Color, Stylize};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::MemHistory;
use rustyline::{CompletionType, Config, Context, Editor};
use rustyline_derive::{Helper, Hinter, Validator};
use std::borrow::Cow;
use std::borrow::Cow::{Borrowed, Owned};

struct CommandHint {
    short: String,
    long: String,
}

impl CommandHint {
    fn display_with_short(&self) -> String {
        if self.long.starts_with(&self.short) {
            format!(
                "{}{}",
                self.short.clone().bold().underlined(),
                &self.long[self.short.len()..]
            )
        } else {
            format!("{}|{}", &self.long, self.short.clone().bold().underlined())
        }
    }
}

impl From<(&str, &str)> for CommandHint {
    fn from((short, long): (&str, &str)) -> Self {
        CommandHint {
            short: short.to_string(),
            long: long.to_string(),
        }
    }
}

pub struct CommandCompleter {
    commands: Vec<CommandHint>,
}

impl CommandCompleter {
    fn new(commands: impl IntoIterator<Item = CommandHint>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let line = line.to_lowercase();
        let pairs = self
            .commands
            .iter()
            .filter(|&cmd| cmd.long.starts_with(&line))
            .map(|cmd| Pair {
                display: cmd.display_with_short(),
                replacement: cmd.long.clone(),
            })
            .collect();
        Ok((0, pairs))
    }
}

#[derive(Helper, Hinter, Validator)]
pub struct RLHelper {
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    colored_prompt: String,
}

impl Completer for RLHelper {
    type Candidate = <CommandCompleter as Completer>::Candidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for RLHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(format!("{}", hint.with(Color::Grey)))
    }
}

pub type DGEditor = Editor<RLHelper, MemHistory>;

pub fn create_editor(promt: &str) -> anyhow::Result<DGEditor> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let commands = [
        (HELP_COMMAND_SHORT, HELP_COMMAND).into(),
        (QUIT_COMMAND_SHORT, QUIT_COMMAND).into(),
        (RUN_COMMAND_SHORT, RUN_COMMAND).into(),
        (STEP_COMMAND_SHORT, STEP_COMMAND).into(),
    ];

    let h = RLHelper {
        completer: CommandCompleter::new(commands),
        hinter: HistoryHinter {},
        colored_prompt: format!("{}", promt.with(Color::DarkGreen)),
    };

    let mut editor = Editor::with_history(config, MemHistory::new())?;
    editor.set_helper(Some(h));
    Ok(editor)
}
