mod common;

mod console;
mod session;

use crate::common::{MockSimulator, Program, TestOutput, BLINK_MAP, BLINK_SRC};
use digasm::debugger::{Address, Debugger};
use digasm::ui::console::hook::TerminalHook;
use digasm::ui::console::print::{style, Printer};

#[test]
fn test_entry_line() {
    style::disable_colors();
    let program = Program::new(BLINK_SRC, BLINK_MAP);
    let simulator = MockSimulator::start(vec![]);
    let output = TestOutput::default();

    let debugger = Debugger::new(
        program.path(),
        simulator.transport(),
        TerminalHook::new(Printer::new(output.clone())),
    )
    .unwrap();
    debugger.print_line(Address::ENTRY).unwrap();

    assert_eq!(output.text(), "0x0:   LDI A,1\n");
    assert!(simulator.requests().is_empty());
}
