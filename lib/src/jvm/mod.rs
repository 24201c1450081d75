//! Model of the classes loaded into the runtime
//!
//! Classes live in a [`class_graph::ClassGraph`], which plays the part of the class loader: it
//! resolves names to classes, and answers subtyping questions. Each class carries its own
//! [`class_file::ConstantPool`], and each method with bytecode carries a [`class_file::Code`]
//! with its exception table.

mod access_flags;
pub mod class_file;
pub mod class_graph;
mod errors;
mod names;

pub use access_flags::*;
pub use errors::*;
pub use names::*;
