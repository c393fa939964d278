//! Observability for contract checks
//!
//! Structured one-line JSON events. Logging never changes a validation
//! outcome.
//!
//! ```
//! use payload_contract::observability::Logger;
//!
//! Logger::info("CONTRACT_LOADED", &[("contract", "fuel_entry")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
