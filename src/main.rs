use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use digasm::config::Config;
use digasm::remote::{Tag, TcpTransport};
use digasm::toolchain::{self, Toolchain};
use digasm::ui::console::print::{style, Printer};
use digasm::ui::supervisor::{Action, Supervisor};
use log::info;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ~/.config/digasm/config.toml)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Simulator host, overrides configuration
    #[clap(long)]
    host: Option<String>,

    /// Simulator port, overrides configuration
    #[clap(long)]
    port: Option<u16>,

    /// Translator jar file
    #[clap(long, env = toolchain::JAR_ENV)]
    jar: Option<PathBuf>,

    /// Disable colored output
    #[clap(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build a program and start it in the simulator
    Start { file: PathBuf },
    /// Build a program and debug it step by step
    Debug { file: PathBuf },
    /// Debug a code snippet, `;` separates lines
    Eval { code: String },
    /// Run to the next break instruction
    Run,
    /// Execute a single instruction
    Step,
    /// Stop the simulation
    Stop,
    /// Run in measurement mode
    Measure,
}

impl From<Cmd> for Action {
    fn from(cmd: Cmd) -> Self {
        match cmd {
            Cmd::Start { file } => Action::Start(file),
            Cmd::Debug { file } => Action::Debug(file),
            Cmd::Eval { code } => Action::Eval(code),
            Cmd::Run => Action::Trigger(Tag::Run),
            Cmd::Step => Action::Trigger(Tag::Step),
            Cmd::Stop => Action::Trigger(Tag::Stop),
            Cmd::Measure => Action::Trigger(Tag::Measure),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            Args::command().print_help()?;
            return Ok(());
        }
        Err(e) => e.exit(),
    };
    let Some(cmd) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    if args.no_color || !std::io::stdout().is_terminal() {
        style::disable_colors();
    }

    let mut config = Config::from_file(args.config.as_deref()).unwrap_or_default();
    if let Some(host) = args.host {
        config.remote.host = host;
    }
    if let Some(port) = args.port {
        config.remote.port = port;
    }

    let action = Action::from(cmd);
    let toolchain = match args.jar {
        Some(jar) if action.needs_toolchain() => Some(Toolchain::java(
            config.toolchain.java.as_deref(),
            &jar,
        )?),
        _ => None,
    };

    let transport = TcpTransport::new(config.transport());
    info!(
        target: "remote",
        "simulator endpoint {}:{}",
        transport.config().host,
        transport.config().port
    );

    Supervisor::new(transport, toolchain, Printer::stdout()).run(action)
}
