use super::ExceptionKind;
use crate::jvm::BinaryName;
use crate::runtime::{self, Settings, Vm};
use std::fmt;
use std::io::Write;
use std::process;

/// Report of an exception that unwound the whole call stack of a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncaughtException {
    /// Name of the thread the exception was raised on
    pub thread: String,

    /// Dynamic class of the exception object
    pub class_name: BinaryName,

    /// Detail message, if the exception has one
    pub message: Option<String>,
}

/// Formats as the line printed for uncaught exceptions
impl fmt::Display for UncaughtException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exception in thread \"{}\" {}", self.thread, self.class_name)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// Outcomes of raising that end execution of the thread
///
/// The engine never exits the process itself. By the time one of these is returned the
/// diagnostic has already been written to [`Vm::diagnostics`], and the host is expected to stop
/// interpreting and eventually call [`Fatal::terminate`].
#[derive(Debug)]
pub enum Fatal {
    /// No frame on the call stack handles the exception
    Uncaught(UncaughtException),

    /// The runtime could not create one of its own exceptions
    Bootstrap {
        kind: ExceptionKind,
        error: runtime::Error,
    },

    /// Runtime state was inconsistent (eg. a dangling exception reference)
    Internal(runtime::Error),
}

impl Fatal {
    /// Write the diagnostic for this outcome to the VM's diagnostic sink
    pub(crate) fn report(self, vm: &mut Vm<'_>) -> Fatal {
        match &self {
            Fatal::Uncaught(uncaught) => log::debug!("{}", uncaught),
            _ => log::error!("{}", self),
        }
        if let Err(err) = writeln!(vm.diagnostics, "{}", self).and_then(|_| vm.diagnostics.flush())
        {
            log::error!("Failed to write diagnostic: {}", err);
        }
        self
    }

    /// Exit status the process should end with
    ///
    /// `None` means the process should abort instead of exiting.
    pub fn exit_code(&self, settings: &Settings) -> Option<i32> {
        match self {
            Fatal::Uncaught(_) => Some(settings.uncaught_exit_code),
            Fatal::Bootstrap { .. } | Fatal::Internal(_) => None,
        }
    }

    /// End the process
    ///
    /// An uncaught exception is an orderly exit with a failure status. Anything else means the
    /// runtime itself is broken, so the process aborts.
    pub fn terminate(self, settings: &Settings) -> ! {
        match self.exit_code(settings) {
            Some(code) => process::exit(code),
            None => process::abort(),
        }
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::Uncaught(uncaught) => uncaught.fmt(f),
            Fatal::Bootstrap { kind, error } => {
                write!(f, "Error: unable to raise {}: {}", kind, error)
            }
            Fatal::Internal(error) => {
                write!(f, "Internal error during exception dispatch: {}", error)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uncaught_report_line() {
        let mut uncaught = UncaughtException {
            thread: String::from("main"),
            class_name: BinaryName::RUNTIMEEXCEPTION,
            message: Some(String::from("boom")),
        };
        assert_eq!(
            uncaught.to_string(),
            "Exception in thread \"main\" java/lang/RuntimeException: boom"
        );

        uncaught.message = None;
        uncaught.thread = String::from("worker-1");
        assert_eq!(
            uncaught.to_string(),
            "Exception in thread \"worker-1\" java/lang/RuntimeException"
        );
    }

    #[test]
    fn exit_codes() {
        let mut settings = Settings::new();
        settings.uncaught_exit_code = 3;

        let uncaught = Fatal::Uncaught(UncaughtException {
            thread: String::from("main"),
            class_name: BinaryName::ARITHMETICEXCEPTION,
            message: None,
        });
        assert_eq!(uncaught.exit_code(&settings), Some(3));

        let bootstrap = Fatal::Bootstrap {
            kind: ExceptionKind::OutOfMemory,
            error: runtime::Error::OutOfMemory { limit: 4 },
        };
        assert_eq!(bootstrap.exit_code(&settings), None);
        assert_eq!(
            bootstrap.to_string(),
            "Error: unable to raise java/lang/OutOfMemoryError: heap limit of 4 objects reached"
        );
    }
}
