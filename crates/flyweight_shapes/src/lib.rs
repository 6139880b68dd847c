//! Flyweight shapes
//!
//! A shape holds only its intrinsic state (for ovals, whether they are filled). Everything that
//! differs between two uses of the same shape, position, size and color, is handed to
//! [`Shape::draw`] on every call. The [`ShapeRegistry`] makes sure at most one instance per
//! [`ShapeKind`] is ever built.

pub mod kind;
pub mod registry;
pub mod shape;

pub use kind::ShapeKind;
pub use registry::{ShapeConstructor, ShapeRegistry, SharedShapeRegistry};
pub use shape::{Line, Oval, Shape};
