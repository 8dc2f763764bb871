//! Top-level facade crate for metrik.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use metrik_core::*;
}

pub mod server {
    pub use metrik_server::*;
}
