//! Lifecycle management for watch mode.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl-C received → trigger → watch loop exits → watcher dropped
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
