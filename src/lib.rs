pub mod config;
pub mod debugger;
pub mod error;
pub mod remote;
pub mod toolchain;
pub mod ui;
