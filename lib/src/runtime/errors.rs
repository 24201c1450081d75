use super::ObjectRef;
use crate::jvm;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The heap already holds as many objects as it is allowed to
    OutOfMemory { limit: usize },

    /// Reference does not point at a live object of the expected shape
    InvalidReference(ObjectRef),

    /// Object has no field at this slot
    InvalidField { object: ObjectRef, slot: usize },

    /// Pushing would take the operand stack past `max_stack` slots
    OperandStackOverflow { max_stack: usize },

    /// Pushing would take the call stack past its frame limit
    CallStackOverflow { max_frames: usize },

    /// Returning or raising with no frame on the call stack
    EmptyCallStack,

    Class(jvm::Error),
}

impl From<jvm::Error> for Error {
    fn from(err: jvm::Error) -> Error {
        Error::Class(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfMemory { limit } => write!(f, "heap limit of {} objects reached", limit),
            Error::InvalidReference(object) => write!(f, "invalid reference {}", object),
            Error::InvalidField { object, slot } => {
                write!(f, "object {} has no field in slot {}", object, slot)
            }
            Error::OperandStackOverflow { max_stack } => {
                write!(f, "operand stack overflow (max_stack = {})", max_stack)
            }
            Error::CallStackOverflow { max_frames } => {
                write!(f, "call stack overflow ({} frames)", max_frames)
            }
            Error::EmptyCallStack => f.write_str("call stack is empty"),
            Error::Class(err) => err.fmt(f),
        }
    }
}
