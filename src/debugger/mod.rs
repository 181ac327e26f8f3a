pub mod address;
pub mod map;
pub mod source;

pub use address::Address;
pub use map::{AddressMap, BreakpointEntry};
pub use source::SourceListing;

use crate::error::Error;
use crate::remote::{Tag, Transport};
use log::{debug, warn};
use std::path::Path;

/// Source place where the simulator currently stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceDescriptor<'a> {
    pub address: Address,
    pub line_number: u64,
    pub line: &'a str,
}

pub trait EventHook {
    /// Called when the simulator stops at address with a known source place.
    fn on_stop(&self, place: PlaceDescriptor) -> anyhow::Result<()>;
}

/// Debug session over a program loaded into the simulator.
///
/// Owns program source listing and address map, talks to the simulator through a transport,
/// and reports every stop to the event hook.
pub struct Debugger<T: Transport, H: EventHook> {
    transport: T,
    listing: SourceListing,
    map: AddressMap,
    hooks: H,
}

impl<T: Transport, H: EventHook> Debugger<T, H> {
    /// Create debugger for a source file, its map file must be already produced by translator.
    pub fn new(source: &Path, transport: T, hooks: H) -> Result<Self, Error> {
        let listing = SourceListing::load(source)?;
        let map = AddressMap::load(&map::map_path(source))?;
        debug!(
            target: "debugger",
            "{} source lines, {} map records",
            listing.len(),
            map.len()
        );
        Ok(Self::from_parts(listing, map, transport, hooks))
    }

    pub fn from_parts(listing: SourceListing, map: AddressMap, transport: T, hooks: H) -> Self {
        Self {
            transport,
            listing,
            map,
            hooks,
        }
    }

    /// Return source place for an address, `None` if address has no source line.
    pub fn place(&self, address: Address) -> Option<PlaceDescriptor> {
        let line_number = self.map.line(address)?;
        let Some(line) = self.listing.line(line_number) else {
            warn!(
                target: "debugger",
                "address {address} mapped to line {line_number}, but source has only {} lines",
                self.listing.len()
            );
            return None;
        };

        Some(PlaceDescriptor {
            address,
            line_number,
            line,
        })
    }

    /// Report source line for an address. Addresses without a source line are ignored.
    pub fn print_line(&self, address: Address) -> Result<(), Error> {
        match self.place(address) {
            Some(place) => self.hooks.on_stop(place).map_err(Error::Hook),
            None => {
                debug!(target: "debugger", "no source line at {address}");
                Ok(())
            }
        }
    }

    /// Execute a single instruction and report where the simulator stopped.
    pub fn step(&self) -> Result<Address, Error> {
        self.resume(Tag::Step)
    }

    /// Run to the next break instruction and report where the simulator stopped.
    pub fn run_to_break(&self) -> Result<Address, Error> {
        self.resume(Tag::Run)
    }

    fn resume(&self, tag: Tag) -> Result<Address, Error> {
        let reply = self
            .transport
            .send(tag, None)?
            .ok_or_else(|| Error::Protocol(format!("no reply to `{tag}`")))?;
        let address: Address = reply
            .argument
            .as_deref()
            .ok_or_else(|| Error::Protocol(format!("reply `{reply}` has no address")))?
            .parse()?;

        self.print_line(address)?;
        Ok(address)
    }
}
