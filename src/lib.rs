//! Flyweight shape demo
//!
//! Draws scenes made of many shapes while only ever building one instance per shape kind. The
//! heavy lifting lives in the member crates; this crate composes them.

pub mod scene;

pub use flyweight_canvas as canvas;
pub use flyweight_config as config;
pub use flyweight_shapes as shapes;
pub use flyweight_shared as shared;
