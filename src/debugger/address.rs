use crate::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Program address in simulator memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address {
    /// Address of program entry point.
    pub const ENTRY: Address = Address(0);

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Parse address from hex string as simulator report it (without `0x` prefix).
impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        u64::from_str_radix(digits, 16)
            .map(Address)
            .map_err(|e| Error::Protocol(format!("invalid address `{digits}`: {e}")))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:#X}", self.0))
    }
}
