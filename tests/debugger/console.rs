use crate::common::{
    closed_port, transport_config, MockSimulator, Program, TestOutput, BLINK_MAP, BLINK_SRC,
};
use digasm::debugger::Debugger;
use digasm::error::Error;
use digasm::remote::{TcpTransport, Transport};
use digasm::ui::console::hook::TerminalHook;
use digasm::ui::console::print::{style, Printer};
use digasm::ui::console::{ScriptedInput, TerminalApplication};

fn application<T: Transport>(
    program: &Program,
    transport: T,
    script: &[&str],
) -> (TerminalApplication<T, ScriptedInput>, TestOutput) {
    style::disable_colors();
    let output = TestOutput::default();
    let printer = Printer::new(output.clone());
    let debugger =
        Debugger::new(program.path(), transport, TerminalHook::new(printer.clone())).unwrap();
    let app = TerminalApplication::new(debugger, ScriptedInput::new(script.iter().copied()), printer);
    (app, output)
}

#[test]
fn test_help_and_unknown_input() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![]);
    let (app, output) = application(
        &program,
        simulator.transport(),
        &["help", "bogus", "", "quit", "step"],
    );

    let input = app.run().unwrap();
    assert_eq!(input.consumed(), 4);

    assert_eq!(
        output.text(),
        "0x0:   LDI A,1\n\
         h - help\n\
         q - quit\n\
         r - run to next breakpoint\n\
         s - do a single instruction step\n"
    );
    assert!(simulator.requests().is_empty());
}

#[test]
fn test_step_and_run() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("step:2"), Some("run:1a")]);
    let (app, output) = application(&program, simulator.transport(), &["S", "r", "Q"]);

    let input = app.run().unwrap();
    assert_eq!(input.consumed(), 3);

    assert_eq!(
        output.text(),
        "0x0:   LDI A,1\n0x2:   LDI B,0\n0x1A:   MOV A,B\n"
    );
    assert_eq!(simulator.requests(), vec!["step", "run"]);
}

#[test]
fn test_end_of_input() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("step:1b")]);
    let (app, output) = application(&program, simulator.transport(), &["s"]);

    let input = app.run().unwrap();
    assert_eq!(input.consumed(), 1);
    assert!(output.text().ends_with("0x1B:   brk\n"));
    simulator.requests();
}

#[test]
fn test_simulator_error_keeps_session() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("error:halted"), Some("step:2")]);
    let (app, output) = application(&program, simulator.transport(), &["r", "s", "q"]);

    let input = app.run().unwrap();
    assert_eq!(input.consumed(), 3);

    let text = output.text();
    assert!(text.contains("error: simulator error: halted"));
    assert!(text.ends_with("0x2:   LDI B,0\n"));
    simulator.requests();
}

#[test]
fn test_transport_failure_ends_session() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let transport = TcpTransport::new(transport_config(closed_port()));
    let (app, output) = application(&program, transport, &["step", "help"]);

    let err = app.run().err().unwrap();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Connection(_))
    ));
    assert!(output.text().contains("fatal error"));
    assert!(!output.text().contains("h - help"));
}
