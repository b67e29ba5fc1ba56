//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader, linter, watcher
//!     → tracing events (structured fields)
//!     → logging.rs (subscriber, filter, stderr)
//! ```

pub mod logging;

pub use logging::init_logging;
