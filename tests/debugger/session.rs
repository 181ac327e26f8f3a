use crate::common::{
    closed_port, transport_config, MockSimulator, Program, TestOutput, BLINK_MAP, BLINK_SRC,
};
use digasm::debugger::{Address, Debugger};
use digasm::error::Error;
use digasm::remote::{Tag, TcpTransport, Transport};
use digasm::ui::console::hook::TerminalHook;
use digasm::ui::console::print::{style, Printer};

fn debugger<T: Transport>(program: &Program, transport: T) -> (Debugger<T, TerminalHook>, TestOutput) {
    style::disable_colors();
    let output = TestOutput::default();
    let debugger = Debugger::new(
        program.path(),
        transport,
        TerminalHook::new(Printer::new(output.clone())),
    )
    .unwrap();
    (debugger, output)
}

#[test]
fn test_step_prints_source_line() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("step:1a")]);
    let (debugger, output) = debugger(&program, simulator.transport());

    assert_eq!(debugger.step().unwrap(), Address::from(0x1a));

    assert_eq!(output.text(), "0x1A:   MOV A,B\n");
    assert_eq!(simulator.requests(), vec!["step"]);
}

#[test]
fn test_run_into_gap() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("run:10"), Some("run:1B")]);
    let (debugger, output) = debugger(&program, simulator.transport());

    debugger.run_to_break().unwrap();
    debugger.run_to_break().unwrap();

    assert_eq!(output.text(), "0x10:   LDI B,0\n0x1B:   brk\n");
    assert_eq!(simulator.requests(), vec!["run", "run"]);
}

#[test]
fn test_unmapped_address_is_silent() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("step:ff")]);
    let (debugger, output) = debugger(&program, simulator.transport());

    assert_eq!(debugger.step().unwrap(), Address::from(0xff));

    assert_eq!(output.text(), "");
    simulator.requests();
}

#[test]
fn test_simulator_error() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![Some("error:no program loaded")]);
    let (debugger, output) = debugger(&program, simulator.transport());

    let err = debugger.run_to_break().unwrap_err();
    assert!(matches!(&err, Error::Simulator(msg) if msg == "no program loaded"));
    assert!(!err.is_fatal());
    assert_eq!(output.text(), "");
    simulator.requests();
}

#[test]
fn test_simulator_unreachable() {
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let transport = TcpTransport::new(transport_config(closed_port()));
    let (debugger, _) = debugger(&program, transport);

    let err = debugger.step().unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_optional_reply() {
    let simulator = MockSimulator::start(vec![None, Some("measure:1024")]);
    let transport = simulator.transport();

    assert_eq!(transport.send(Tag::Stop, None).unwrap(), None);
    let reply = transport.send(Tag::Measure, None).unwrap().unwrap();
    assert_eq!(reply.argument.as_deref(), Some("1024"));

    assert_eq!(simulator.requests(), vec!["stop", "measure"]);
}

#[test]
fn test_malformed_map() {
    let program = Program::new(BLINK_SRC, r#"[{"addr": 4, "line": 3}, {"addr": 2, "line": 4}]"#);
    let simulator = MockSimulator::start(vec![]);

    let err = Debugger::new(
        program.path(),
        simulator.transport(),
        TerminalHook::new(Printer::new(TestOutput::default())),
    )
    .err()
    .unwrap();
    assert!(matches!(err, Error::Format { .. }));
}
