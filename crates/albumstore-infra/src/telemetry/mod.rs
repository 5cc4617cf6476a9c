//! Telemetry initialization
//!
//! Installs the global `tracing` subscriber. Output is human-readable text by
//! default or JSON lines for log shippers.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, LogFormat};
