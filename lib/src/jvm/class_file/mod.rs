//! Pieces of the class file format the runtime keeps after loading
//!
//! Parsing is done elsewhere: by the time a class reaches the class graph, its constant pool is
//! an in-memory [`ConstantPool`] and each method body is summarized as a [`Code`] attribute.

mod attribute;
mod constants;

pub use attribute::*;
pub use constants::*;
