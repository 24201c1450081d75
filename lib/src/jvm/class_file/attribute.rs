use crate::jvm::class_file::ClassConstantIndex;
use std::fmt;

/// Parts of the [`Code` attribute][0] that outlive class loading
///
/// The bytecode itself belongs to the interpreter; what stays here is what is needed to build a
/// frame for the method and to dispatch exceptions thrown inside it.
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,

    /// Handlers, in the order they appear in the class file
    ///
    /// Compilers emit inner handlers before outer ones, so the first match is the innermost.
    pub exception_table: Vec<ExceptionHandler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// Start of exception handler range (inclusive)
    pub start_pc: BytecodeIndex,

    /// End of exception handler range (inclusive)
    pub end_pc: BytecodeIndex,

    /// Start of the exception handler
    pub handler_pc: BytecodeIndex,

    /// Class of exceptions caught, or `None` to catch everything (index 0 in the class file,
    /// which is how `finally` blocks are compiled)
    pub catch_type: Option<ClassConstantIndex>,
}

impl ExceptionHandler {
    /// Does this handler's range cover the given program counter?
    pub fn covers(&self, pc: BytecodeIndex) -> bool {
        self.start_pc <= pc && pc <= self.end_pc
    }
}

/// Index into the bytecode of a method (aka. a program counter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BytecodeIndex(pub u16);

impl fmt::Display for BytecodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handler_range_is_inclusive() {
        let handler = ExceptionHandler {
            start_pc: BytecodeIndex(0),
            end_pc: BytecodeIndex(10),
            handler_pc: BytecodeIndex(20),
            catch_type: None,
        };
        assert!(handler.covers(BytecodeIndex(0)));
        assert!(handler.covers(BytecodeIndex(5)));
        assert!(handler.covers(BytecodeIndex(10)));
        assert!(!handler.covers(BytecodeIndex(11)));
        assert!(!handler.covers(BytecodeIndex(20)));
    }
}
