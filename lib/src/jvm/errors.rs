use super::class_file::{Constant, ConstantIndex, ConstantPoolOverflow};
use std::fmt;

/// Errors from querying the class model
#[derive(Debug)]
pub enum Error {
    ConstantPoolOverflow {
        constant: Constant,
        offset: u16,
    },

    /// No constant starts at this index
    MissingConstant(ConstantIndex),

    /// The constant at this index is not the sort that was asked for
    UnexpectedConstant {
        index: ConstantIndex,
        expected: &'static str,
        found: Constant,
    },

    /// Class could not be found by the loader
    MissingClass(String),

    /// Member could not be found on a loaded class
    MissingMember(String),

    /// Name is not a valid binary or unqualified name
    MalformedName(String),
}

impl From<ConstantPoolOverflow> for Error {
    fn from(overflow: ConstantPoolOverflow) -> Error {
        Error::ConstantPoolOverflow {
            constant: overflow.constant,
            offset: overflow.offset,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConstantPoolOverflow { constant, offset } => {
                write!(f, "constant pool overflow adding {:?} at {}", constant, offset)
            }
            Error::MissingConstant(index) => write!(f, "no constant at index {}", index.0),
            Error::UnexpectedConstant {
                index,
                expected,
                found,
            } => write!(
                f,
                "expected {} constant at index {}, found {:?}",
                expected, index.0, found
            ),
            Error::MissingClass(name) => write!(f, "class {} not found", name),
            Error::MissingMember(name) => write!(f, "member {} not found", name),
            Error::MalformedName(msg) => f.write_str(msg),
        }
    }
}
