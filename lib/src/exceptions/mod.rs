//! Raising exceptions and unwinding the call stack
//!
//! Exceptions enter the engine in one of two ways:
//!
//!   - the interpreter executes `athrow`, and calls [`Thread::raise`] with the object on top of its
//!     operand stack (a `null` there turns into a `NullPointerException`)
//!   - the interpreter detects a fault itself (dividing by zero, indexing out of bounds, ...) and
//!     calls [`Thread::raise_by_kind`], which creates the exception object first
//!
//! Either way, the exception table of the frame on top of the stack is searched for a handler
//! covering that frame's program counter whose catch type the exception is an instance of. If
//! there is one, the exception is pushed onto the frame's (emptied) operand stack and the program
//! counter moves to the handler. If not, the frame is discarded and the search continues in the
//! caller. When the call stack runs out, the exception is uncaught: it is reported on
//! [`Vm::diagnostics`] and the engine hands back a [`Fatal`] for the host to act on.
//!
//! [`Thread::raise`]: crate::runtime::Thread::raise
//! [`Thread::raise_by_kind`]: crate::runtime::Thread::raise_by_kind
//! [`Vm::diagnostics`]: crate::runtime::Vm::diagnostics

mod fatal;
mod handler;
mod kind;
mod message;
mod synthesize;
mod unwind;

pub use fatal::*;
pub use handler::*;
pub use kind::*;
pub use message::*;
pub use unwind::*;
