use super::{ExceptionKind, Fatal, Raised};
use crate::jvm::{self, UnqualifiedName};
use crate::runtime::{self, Thread, Vm};

impl<'g> Thread<'g> {
    /// Create and raise an exception for a fault the runtime detected itself
    ///
    /// The exception class is loaded, a fresh instance allocated, and its no-argument constructor
    /// run. Constructors without bytecode have nothing left to do once the object is zeroed, so
    /// the exception is raised straight away. Otherwise a frame for the constructor is pushed and
    /// the exception is raised when that frame returns.
    ///
    /// Failing to create the exception is fatal, with two exceptions: running out of heap raises
    /// an `OutOfMemoryError` instead, and running out of call stack for the constructor raises a
    /// `StackOverflowError` instead.
    pub fn raise_by_kind(
        &mut self,
        vm: &mut Vm<'g>,
        kind: ExceptionKind,
    ) -> Result<Raised, Fatal> {
        log::debug!("[{}] Creating {}", self.name(), kind);
        let classes = vm.classes;

        let class = match classes.load_class(&kind.class_name()) {
            Ok(class) => class,
            Err(err) => return Err(bootstrap_failure(vm, kind, err.into())),
        };

        let allocated = if kind == ExceptionKind::OutOfMemory {
            vm.heap.allocate_reserved(class)
        } else {
            vm.heap.allocate(class)
        };
        let exception = match allocated {
            Ok(exception) => exception,
            Err(runtime::Error::OutOfMemory { .. }) if kind != ExceptionKind::OutOfMemory => {
                return self.raise_by_kind(vm, ExceptionKind::OutOfMemory);
            }
            Err(err) => return Err(bootstrap_failure(vm, kind, err)),
        };

        let constructor = match class.find_method(&UnqualifiedName::INIT, "()V") {
            Some(constructor) => constructor,
            None => {
                let missing = jvm::Error::MissingMember(format!("{:?}.<init>()V", class));
                return Err(bootstrap_failure(vm, kind, missing.into()));
            }
        };
        if constructor.code.is_none() {
            return self.raise(vm, Some(exception));
        }

        let escalating_overflow = self.escalating_overflow;
        match self.push_frame(constructor, Some(exception)) {
            Ok(frame) => {
                frame.pending_throw = Some(exception);
                frame.escalating_overflow = escalating_overflow;
                Ok(Raised::ConstructorScheduled)
            }
            Err(runtime::Error::CallStackOverflow { .. })
                if kind != ExceptionKind::StackOverflow =>
            {
                self.raise_by_kind(vm, ExceptionKind::StackOverflow)
            }
            Err(err) => Err(bootstrap_failure(vm, kind, err)),
        }
    }
}

fn bootstrap_failure(vm: &mut Vm<'_>, kind: ExceptionKind, error: runtime::Error) -> Fatal {
    Fatal::Bootstrap { kind, error }.report(vm)
}
