//! # Vending Simulator Library
//!
//! Orchestration layer around `vending-core`.
//!
//! ## Module Organization
//! ```text
//! vending_sim/
//! ├── lib.rs      ◄─── You are here (logging setup)
//! ├── config.rs   ◄─── MachineConfig (defaults, env, JSON)
//! ├── machine.rs  ◄─── VendingMachine orchestrator
//! └── error.rs    ◄─── MachineError for callers
//! ```

pub mod config;
pub mod error;
pub mod machine;

pub use config::{ConfigError, MachineConfig};
pub use error::{ErrorCode, MachineError, MachineResult};
pub use machine::{InsertRejected, MachineSnapshot, PurchaseReceipt, VendingMachine};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every dispensed unit
/// - `RUST_LOG=vending_core=trace` - Core crate only
/// - Default: INFO, debug for the vending crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vending_core=debug,vending_sim=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
