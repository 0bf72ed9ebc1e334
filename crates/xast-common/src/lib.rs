//! Common utilities for the xast workspace.
//!
//! This crate provides shared infrastructure used by all components:
//! - **Source positions** - [`Point`] and [`Position`], the unist location model
//! - **Warning System** - colored terminal output for unsupported features

pub mod position;
pub mod warning;

pub use position::{Point, Position};
