//! metrik server library entry.
//!
//! This crate wires the repository, backup layer, metrics service, and
//! exporters into a cohesive accumulator stack. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod backup;
pub mod config;
pub mod export;
pub mod repository;
pub mod service;
