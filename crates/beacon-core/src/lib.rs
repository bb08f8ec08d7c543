//! Core types and trait definitions for the Beacon presence service.
//!
//! This crate is deliberately free of HTTP and locking concerns. Every other
//! crate depends on it; it depends on nothing but plain data crates.

pub mod clock;
pub mod error;
pub mod geo;
pub mod pin;
pub mod position;
pub mod settings;
pub mod store;

pub use error::{AdmissionError, Result};
