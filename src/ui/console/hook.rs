use crate::debugger::{EventHook, PlaceDescriptor};
use crate::ui::console::print::style::AddressView;
use crate::ui::console::print::Printer;

/// Print every simulator stop as `<address>: <source line>`.
pub struct TerminalHook {
    printer: Printer,
}

impl TerminalHook {
    pub fn new(printer: Printer) -> Self {
        Self { printer }
    }
}

impl EventHook for TerminalHook {
    fn on_stop(&self, place: PlaceDescriptor) -> anyhow::Result<()> {
        self.printer
            .print(format!("{}: {}", AddressView::from(place.address), place.line));
        Ok(())
    }
}
