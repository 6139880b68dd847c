pub use json::*;
pub use memory::*;

mod json;
mod memory;
