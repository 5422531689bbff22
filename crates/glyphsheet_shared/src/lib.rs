//! Shared functionality
//!
//! This crate supplies the geometry and color types that are used by all other
//! glyphsheet crates.
//!

pub mod types;
