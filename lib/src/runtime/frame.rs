use super::{Error, ObjectRef, Value};
use crate::jvm::class_file::{BytecodeIndex, ExceptionHandler};
use crate::jvm::class_graph::MethodId;
use crate::util::{OffsetVec, Width};

/// Operand stack of a single frame
///
/// Capacity is counted in slots, like `max_stack`: `long` and `double` values take two.
#[derive(Debug, Clone)]
pub struct OperandStack {
    values: OffsetVec<Value>,
    max_stack: usize,
}

impl OperandStack {
    pub fn new(max_stack: u16) -> OperandStack {
        OperandStack {
            values: OffsetVec::new(),
            max_stack: max_stack as usize,
        }
    }

    /// Maximum number of slots
    pub fn capacity(&self) -> usize {
        self.max_stack
    }

    /// Number of slots in use
    pub fn depth(&self) -> usize {
        self.values.total_width()
    }

    /// Number of values on the stack
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Push a value, provided it fits
    ///
    /// On failure the stack is left untouched.
    pub fn push(&mut self, value: Value) -> Result<(), Error> {
        if self.values.total_width() + value.width() > self.max_stack {
            log::debug!(
                "Pushing {:?} would overflow the operand stack (max_stack = {})",
                value,
                self.max_stack
            );
            return Err(Error::OperandStackOverflow {
                max_stack: self.max_stack,
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.values.pop().map(|(_, value)| value)
    }

    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn clear(&mut self) {
        self.values.clear()
    }
}

/// Activation record of one method
#[derive(Debug)]
pub struct Frame<'g> {
    pub method: MethodId<'g>,

    /// Program counter
    ///
    /// While the frame is not on top of the stack, this is the index of the call instruction.
    pub pc: BytecodeIndex,

    pub locals: Vec<Value>,

    pub operands: OperandStack,

    /// Exception object to raise in the caller once this frame returns
    ///
    /// Set on the constructor frame pushed when the runtime creates an exception itself.
    pub pending_throw: Option<ObjectRef>,

    /// The pending throw is a `StackOverflowError` raised because a handler couldn't be entered
    pub(crate) escalating_overflow: bool,
}

impl<'g> Frame<'g> {
    /// Fresh frame at the start of a method
    ///
    /// Locals and operand stack are sized from the method's `Code`. Methods without code get an
    /// empty operand stack. `this` (when present) is stored in local 0.
    pub fn new(method: MethodId<'g>, this: Option<ObjectRef>) -> Frame<'g> {
        let (max_stack, max_locals) = match &method.code {
            Some(code) => (code.max_stack, code.max_locals as usize),
            None => (0, 0),
        };
        let mut locals = vec![Value::NULL; max_locals.max(this.is_some() as usize)];
        if let Some(this) = this {
            locals[0] = Value::Reference(Some(this));
        }

        Frame {
            method,
            pc: BytecodeIndex::default(),
            locals,
            operands: OperandStack::new(max_stack),
            pending_throw: None,
            escalating_overflow: false,
        }
    }

    /// Exception table of the frame's method (empty if the method has no code)
    pub fn exception_table(&self) -> &[ExceptionHandler] {
        match &self.method.0.code {
            Some(code) => &code.exception_table,
            None => &[],
        }
    }
}
