//! Logging setup.
//!
//! The library itself only talks to the `log` facade; hosts that want output
//! without wiring their own backend can call [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
