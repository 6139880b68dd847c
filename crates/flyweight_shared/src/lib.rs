//! Shared functionality
//!
//! This crate supplies the types that every other crate in the flyweight workspace speaks:
//! errors, geometry and colors.
//!

pub mod color;
pub mod geo;
pub mod types;
