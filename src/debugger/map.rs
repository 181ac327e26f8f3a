//! Address to source line mapping.
//!
//! Translator emits a map file - a JSON array of `{"addr": .., "line": ..}` records, one per
//! instruction that starts a source line. Simulator may stop at any address, so every address
//! between two records inherits the line of the preceding record.

use crate::debugger::address::Address;
use crate::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of a map file produced by the translator.
pub const MAP_EXTENSION: &str = "map";

/// Single map file record.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BreakpointEntry {
    pub addr: u64,
    pub line: u64,
}

/// Total mapping from addresses in `[first entry address, last entry address]` into 1-based
/// source line numbers.
///
/// Only records are stored, an address between two records resolves to the nearest record
/// below it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AddressMap {
    lines: BTreeMap<u64, u64>,
}

impl AddressMap {
    /// Load map from a file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let format_err = |reason: String| Error::Format {
            file: path.to_path_buf(),
            reason,
        };

        let data = fs::read_to_string(path)?;
        let entries: Vec<BreakpointEntry> =
            serde_json::from_str(&data).map_err(|e| format_err(e.to_string()))?;
        Self::from_entries(&entries).map_err(format_err)
    }

    /// Build map from records ordered by non-decreasing address.
    pub fn from_entries(entries: &[BreakpointEntry]) -> Result<Self, String> {
        let mut lines = BTreeMap::new();
        let mut prev: Option<&BreakpointEntry> = None;

        for entry in entries {
            if entry.line == 0 {
                return Err(format!("line numbers are 1-based, got 0 at address {:#X}", entry.addr));
            }

            if let Some(prev) = prev {
                if entry.addr < prev.addr {
                    return Err(format!(
                        "entries out of order: address {:#X} follows {:#X}",
                        entry.addr, prev.addr
                    ));
                }
            }

            // duplicate address, latest record wins
            lines.insert(entry.addr, entry.line);
            prev = Some(entry);
        }

        Ok(Self { lines })
    }

    /// Return source line number for an address, `None` if address outside of mapped range.
    pub fn line(&self, addr: Address) -> Option<u64> {
        let addr = addr.as_u64();
        let (&last, _) = self.lines.last_key_value()?;
        if addr > last {
            return None;
        }
        self.lines.range(..=addr).next_back().map(|(_, &line)| line)
    }

    /// Return number of map records.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Return path of a map file produced for a source file.
pub fn map_path(source: &Path) -> PathBuf {
    source.with_extension(MAP_EXTENSION)
}
