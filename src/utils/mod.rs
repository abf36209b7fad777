//! Shared utilities

pub mod progress;
