use super::{Error, Heap, ObjectRef, Settings, Value};
use crate::jvm::class_graph::{ClassGraph, ClassId};
use crate::jvm::{BinaryName, UnqualifiedName};
use std::io::{self, Write};

/// State shared by every thread of the virtual machine
pub struct Vm<'g> {
    /// Loaded classes
    pub classes: &'g ClassGraph<'g>,

    pub heap: Heap<'g>,

    pub settings: Settings,

    /// Where uncaught exceptions are reported (standard error by default)
    pub diagnostics: Box<dyn Write>,
}

impl<'g> Vm<'g> {
    pub fn new(classes: &'g ClassGraph<'g>, settings: Settings) -> Vm<'g> {
        Vm {
            classes,
            heap: Heap::new(settings.heap_limit, settings.heap_reserve),
            settings,
            diagnostics: Box::new(io::stderr()),
        }
    }

    /// Replace the sink for uncaught exception reports
    pub fn with_diagnostics(mut self, diagnostics: impl Write + 'static) -> Vm<'g> {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Allocate a `java/lang/String`
    pub fn new_string(&mut self, text: &str) -> Result<ObjectRef, Error> {
        let string_class = self.classes.load_class(&BinaryName::STRING)?;
        self.heap.allocate_string(string_class, text)
    }

    /// Allocate a throwable with its `detailMessage` set
    ///
    /// This is what `new Foo(message)` amounts to for the library's throwables, whose constructors
    /// just store the message.
    pub fn new_throwable(
        &mut self,
        class: ClassId<'g>,
        message: Option<&str>,
    ) -> Result<ObjectRef, Error> {
        let throwable = self.heap.allocate(class)?;
        if let Some(message) = message {
            let slot = class
                .field_slot(&UnqualifiedName::DETAILMESSAGE)
                .ok_or_else(|| {
                    crate::jvm::Error::MissingMember(format!("{:?}.detailMessage", class))
                })?;
            let message = self.new_string(message)?;
            self.heap
                .set_field(throwable, slot, Value::Reference(Some(message)))?;
        }
        Ok(throwable)
    }
}
