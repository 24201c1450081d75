use super::{extract_message, find_handler, ExceptionKind, Fatal, UncaughtException};
use crate::jvm::class_file::BytecodeIndex;
use crate::jvm::class_graph::ClassId;
use crate::runtime::{self, ObjectModel, ObjectRef, Thread, Value, Vm};
use std::mem;

/// Where execution continues after an exception is raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raised {
    /// A handler was found: resume interpreting the current frame at `handler_pc`
    ///
    /// The exception is the only value on that frame's operand stack.
    Caught {
        handler_pc: BytecodeIndex,

        /// Number of frames left on the call stack (the handler's frame is the top one)
        depth: usize,

        /// Number of frames discarded while searching for the handler
        frames_popped: usize,
    },

    /// The exception's constructor has bytecode, and a frame for it has been pushed
    ///
    /// Resume interpreting the new top frame. When it returns (through
    /// [`Thread::return_from_frame`]) the exception is raised.
    ConstructorScheduled,
}

impl<'g> Thread<'g> {
    /// Raise an exception object (as `athrow` does)
    ///
    /// `None` is a `null` reference, which raises a `NullPointerException` instead.
    pub fn raise(
        &mut self,
        vm: &mut Vm<'g>,
        exception: Option<ObjectRef>,
    ) -> Result<Raised, Fatal> {
        let exception = match exception {
            Some(exception) => exception,
            None => {
                log::debug!("[{}] Raising null", self.name());
                return self.raise_by_kind(vm, ExceptionKind::NullPointer);
            }
        };
        let class = match vm.heap.runtime_class(exception) {
            Some(class) => class,
            None => {
                return Err(Fatal::Internal(runtime::Error::InvalidReference(exception)).report(vm))
            }
        };
        log::debug!("[{}] Raising {:?} ({})", self.name(), class, exception);

        let classes = vm.classes;
        let mut frames_popped = 0;
        loop {
            let depth = self.depth();
            let frame = match self.current_frame_mut() {
                Some(frame) => frame,
                None => break,
            };

            let handler = find_handler(
                frame.exception_table(),
                &frame.method.class.constants,
                frame.pc,
                class,
                classes,
            )
            .copied();

            if let Some(handler) = handler {
                log::debug!(
                    "Caught {:?} in {:?} at pc {}, continuing at {}",
                    class,
                    frame.method,
                    frame.pc,
                    handler.handler_pc
                );
                frame.operands.clear();
                if let Err(err) = frame.operands.push(Value::Reference(Some(exception))) {
                    return self.escalate_overflow(vm, err);
                }
                frame.pc = handler.handler_pc;
                return Ok(Raised::Caught {
                    handler_pc: handler.handler_pc,
                    depth,
                    frames_popped,
                });
            }

            log::trace!(
                "No handler for {:?} in {:?} at pc {}",
                class,
                frame.method,
                frame.pc
            );
            self.pop_frame();
            frames_popped += 1;
        }

        Err(self.uncaught(vm, exception, class))
    }

    /// Return from the method on top of the call stack
    ///
    /// If that frame was the constructor of an exception the runtime created, the exception is
    /// now raised in the caller and the outcome is returned. A `StackOverflowError` created
    /// because a handler couldn't be entered is raised with the overflow guard still up, so
    /// failing to enter a handler for it is fatal.
    pub fn return_from_frame(&mut self, vm: &mut Vm<'g>) -> Result<Option<Raised>, Fatal> {
        let frame = match self.pop_frame() {
            Some(frame) => frame,
            None => return Err(Fatal::Internal(runtime::Error::EmptyCallStack).report(vm)),
        };
        match frame.pending_throw {
            Some(exception) => {
                log::debug!(
                    "[{}] Constructor {:?} finished, raising {}",
                    self.name(),
                    frame.method,
                    exception
                );
                let outer =
                    mem::replace(&mut self.escalating_overflow, frame.escalating_overflow);
                let raised = self.raise(vm, Some(exception)).map(Some);
                self.escalating_overflow = outer;
                raised
            }
            None => Ok(None),
        }
    }

    /// A handler was found but the exception couldn't be pushed onto its operand stack
    ///
    /// That is a stack overflow, raised through the usual protocol from the frame that couldn't
    /// take the exception. Failing to push the `StackOverflowError` as well is fatal.
    fn escalate_overflow(
        &mut self,
        vm: &mut Vm<'g>,
        error: runtime::Error,
    ) -> Result<Raised, Fatal> {
        if self.escalating_overflow {
            return Err(Fatal::Internal(error).report(vm));
        }
        log::debug!("[{}] Handler could not be entered: {}", self.name(), error);

        self.escalating_overflow = true;
        let raised = self.raise_by_kind(vm, ExceptionKind::StackOverflow);
        self.escalating_overflow = false;
        raised
    }

    /// The call stack is empty: report the exception
    fn uncaught(&self, vm: &mut Vm<'g>, exception: ObjectRef, class: ClassId<'g>) -> Fatal {
        let uncaught = UncaughtException {
            thread: self.name().to_owned(),
            class_name: class.name.clone(),
            message: extract_message(&vm.heap, exception),
        };
        Fatal::Uncaught(uncaught).report(vm)
    }
}
