//! PTAV - elementary stream extraction for PTAV media files
//!
//! This library crate exposes the batch pipeline and its glue for the `ptav`
//! binary and for integration testing.

pub mod config;
pub mod discovery;
pub mod manifest;
pub mod pipeline;
