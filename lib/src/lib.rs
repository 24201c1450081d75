//! Exception dispatch and stack unwinding for a JVM bytecode interpreter
//!
//! The crate is split into three layers:
//!
//!   - [`jvm`] models the classes the interpreter has loaded: names, access flags, constant
//!     pools, method code (with exception tables) and the class graph used for "is-a" queries
//!   - [`runtime`] holds the state the interpreter mutates: the heap, per-thread frame stacks,
//!     operand stacks, and the VM settings
//!   - [`exceptions`] is the engine itself: synthesizing exceptions for internally detected
//!     faults, matching exception tables, unwinding frames, and reporting uncaught exceptions
//!
//! ### Simple example
//!
//! ```
//! use jthrow::exceptions::{ExceptionKind, Raised};
//! use jthrow::jvm::class_file::{BytecodeIndex, Code, ConstantPool, ExceptionHandler};
//! use jthrow::jvm::class_graph::*;
//! use jthrow::jvm::*;
//! use jthrow::runtime::{Settings, Thread, Vm};
//!
//! let arenas = ClassGraphArenas::new();
//! let class_graph = ClassGraph::new(&arenas);
//! let java = class_graph.insert_java_library_types();
//!
//! // `static void run()` in `me/alec/Main`, catching `ArithmeticException` in `[0, 10]`
//! let mut constants = ConstantPool::new();
//! let catch_type = constants.get_class(&BinaryName::ARITHMETICEXCEPTION).unwrap();
//! let class = class_graph.add_class(ClassData::new(
//!     BinaryName::from_string(String::from("me/alec/Main")).unwrap(),
//!     java.lang.object,
//!     ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
//!     constants,
//! ));
//! let run = class_graph.add_method(MethodData {
//!     class,
//!     name: UnqualifiedName::from_string(String::from("run")).unwrap(),
//!     descriptor: "()V".into(),
//!     access_flags: MethodAccessFlags::STATIC,
//!     code: Some(Code {
//!         max_stack: 2,
//!         max_locals: 0,
//!         exception_table: vec![ExceptionHandler {
//!             start_pc: BytecodeIndex(0),
//!             end_pc: BytecodeIndex(10),
//!             handler_pc: BytecodeIndex(20),
//!             catch_type: Some(catch_type),
//!         }],
//!     }),
//! });
//!
//! let mut vm = Vm::new(&class_graph, Settings::new());
//! let mut thread = Thread::main(&vm.settings);
//! thread.push_frame(run, None).unwrap();
//! thread.current_frame_mut().unwrap().pc = BytecodeIndex(5);
//!
//! // Dividing by zero at `pc = 5` lands in the handler
//! let raised = thread.raise_by_kind(&mut vm, ExceptionKind::Arithmetic).unwrap();
//! assert_eq!(
//!     raised,
//!     Raised::Caught { handler_pc: BytecodeIndex(20), depth: 1, frames_popped: 0 }
//! );
//! ```

pub mod exceptions;
pub mod jvm;
pub mod runtime;
pub mod util;
