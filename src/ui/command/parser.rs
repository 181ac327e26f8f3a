use super::{Command, CommandError, CommandResult};
use chumsky::error::Rich;
use chumsky::prelude::{choice, end, just};
use chumsky::{extra, Parser};

pub const HELP_COMMAND: &str = "help";
pub const HELP_COMMAND_SHORT: &str = "h";
pub const QUIT_COMMAND: &str = "quit";
pub const QUIT_COMMAND_SHORT: &str = "q";
pub const RUN_COMMAND: &str = "run";
pub const RUN_COMMAND_SHORT: &str = "r";
pub const STEP_COMMAND: &str = "step";
pub const STEP_COMMAND_SHORT: &str = "s";

type Err<'a> = extra::Err<Rich<'a, char>>;

impl Command {
    /// Parse input string into command, case is ignored.
    pub fn parse(input: &str) -> CommandResult<Command> {
        let input = input.to_lowercase();
        let result = Self::parser()
            .parse(input.as_str())
            .into_result()
            .map_err(|errs| {
                CommandError::Parsing(
                    errs.into_iter()
                        .next()
                        .map(|e| e.to_string())
                        .unwrap_or_default(),
                )
            });
        result
    }

    fn parser<'a>() -> impl Parser<'a, &'a str, Command, Err<'a>> {
        let op = |sym| just(sym).padded();

        let help = op(HELP_COMMAND)
            .or(op(HELP_COMMAND_SHORT))
            .to(Command::Help)
            .labelled(HELP_COMMAND);
        let quit = op(QUIT_COMMAND)
            .or(op(QUIT_COMMAND_SHORT))
            .to(Command::Quit)
            .labelled(QUIT_COMMAND);
        let run = op(RUN_COMMAND)
            .or(op(RUN_COMMAND_SHORT))
            .to(Command::Run)
            .labelled(RUN_COMMAND);
        let step = op(STEP_COMMAND)
            .or(op(STEP_COMMAND_SHORT))
            .to(Command::Step)
            .labelled(STEP_COMMAND);

        choice((help, quit, run, step)).then_ignore(end())
    }
}
