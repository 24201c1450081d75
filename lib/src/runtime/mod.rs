//! Interpreter state that exception dispatch reads and mutates
//!
//! None of this executes bytecode. It is the state an interpreter keeps around (the heap, one
//! call stack per thread, and the frames on those stacks) in the shape the unwinder needs.

mod errors;
mod frame;
mod heap;
mod settings;
mod thread;
mod value;
mod vm;

pub use errors::*;
pub use frame::*;
pub use heap::*;
pub use settings::*;
pub use thread::*;
pub use value::*;
pub use vm::*;
