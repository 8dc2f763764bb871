//! metrik core: the metric data model and error surface.
//!
//! This crate defines the domain types shared by the server, storage
//! backends, and exporters. It intentionally carries no runtime or storage
//! dependencies so it can be reused in multiple contexts (server, agents,
//! tooling).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetrikError`/`Result` so production
//! processes do not crash on a bad backend or malformed snapshot.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;

/// Shared result type.
pub use error::{MetrikError, Result};
pub use metric::{Metric, MetricKind, MetricValue};
