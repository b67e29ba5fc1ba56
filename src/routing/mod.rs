//! Route table model and ordering.
//!
//! # Data Flow
//! ```text
//! Route path template
//!     → segment.rs (split, classify static/variable)
//!     → comparator.rs (priority between two routes)
//!     → order.rs (canonical order for a table, first divergence)
//! ```
//!
//! # Design Decisions
//! - Routes are read-only snapshots; nothing here mutates them
//! - Deterministic: same table always yields the same canonical order
//! - Versioned routes are checked before unversioned ones
//! - First match wins, so specific routes come before general ones

pub mod comparator;
pub mod model;
pub mod order;
pub mod segment;

pub use comparator::{compare_paths, compare_routes};
pub use model::{ApiState, Route, Subroute, Subroutes, VersionValue};
pub use order::{canonical_order, check_path_order};
