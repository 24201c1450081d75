use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use jthrow::exceptions::{ExceptionKind, Raised};
use jthrow::jvm::class_file::{BytecodeIndex, Code, ConstantPool, ExceptionHandler};
use jthrow::jvm::class_graph::{
    ClassData, ClassGraph, ClassGraphArenas, ClassId, MethodData, MethodId,
};
use jthrow::jvm::{BinaryName, ClassAccessFlags, MethodAccessFlags, Name, UnqualifiedName};
use jthrow::runtime::{Settings, Thread, Vm};
use std::io::{self, Write};
use std::process::exit;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Entry of an exception table, as written on the command line
///
/// The format is `CLASS@START-END:HANDLER`, where `CLASS` is `*` for a handler that catches
/// everything.
#[derive(Debug, Clone)]
struct CatchArg {
    catch_type: Option<BinaryName>,
    start_pc: u16,
    end_pc: u16,
    handler_pc: u16,
}

fn parse_catch(arg: &str) -> Result<CatchArg, String> {
    let (class, range) = arg
        .split_once('@')
        .ok_or_else(|| format!("expected CLASS@START-END:HANDLER, got {:?}", arg))?;
    let (range, handler) = range
        .split_once(':')
        .ok_or_else(|| format!("missing handler in {:?}", arg))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got {:?}", range))?;
    let bytecode_index = |text: &str| {
        text.trim()
            .parse::<u16>()
            .map_err(|err| format!("bad bytecode index {:?}: {}", text, err))
    };

    let catch_type = match class {
        "*" => None,
        class => Some(BinaryName::from_java_name(class)?),
    };
    Ok(CatchArg {
        catch_type,
        start_pc: bytecode_index(start)?,
        end_pc: bytecode_index(end)?,
        handler_pc: bytecode_index(handler)?,
    })
}

fn parse_kind(arg: &str) -> Result<ExceptionKind, String> {
    ExceptionKind::from_class_name(arg).ok_or_else(|| {
        let known: Vec<String> = ExceptionKind::ALL
            .iter()
            .map(|kind| kind.class_name().simple_name().to_owned())
            .collect();
        format!("unknown exception kind {:?} (expected one of {})", arg, known.join(", "))
    })
}

/// What gets raised in the innermost frame
enum Source<'g> {
    Kind(ExceptionKind),
    Object {
        class: ClassId<'g>,
        message: Option<String>,
    },
    Null,
}

fn main() -> io::Result<()> {
    env_logger::init();

    let matches = Command::new("Exception dispatch runner")
        .version(clap::crate_version!())
        .author("Alec Theriault <alec.theriault@gmail.com>")
        .about("Raise an exception in a two frame call stack and report where it lands")
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_name("KIND")
                .value_parser(parse_kind)
                .help("Raise an exception the runtime creates itself (eg. `ArithmeticException`)"),
        )
        .arg(
            Arg::new("throw")
                .long("throw")
                .value_name("CLASS")
                .help("Raise a new instance of this throwable class (as `athrow` would)"),
        )
        .arg(
            Arg::new("null")
                .long("null")
                .action(ArgAction::SetTrue)
                .help("Raise a `null` reference"),
        )
        .group(
            ArgGroup::new("source")
                .args(["kind", "throw", "null"])
                .required(true),
        )
        .arg(
            Arg::new("message")
                .long("message")
                .value_name("MESSAGE")
                .requires("throw")
                .help("Detail message of the thrown object"),
        )
        .arg(
            Arg::new("catch")
                .long("catch")
                .value_name("CLASS@START-END:HANDLER")
                .value_parser(parse_catch)
                .action(ArgAction::Append)
                .help("Add a handler to the method that raises (`*` catches everything)"),
        )
        .arg(
            Arg::new("caller-catch")
                .long("caller-catch")
                .value_name("CLASS@START-END:HANDLER")
                .value_parser(parse_catch)
                .action(ArgAction::Append)
                .help("Add a handler to the calling method"),
        )
        .arg(
            Arg::new("pc")
                .long("pc")
                .value_name("INDEX")
                .value_parser(value_parser!(u16))
                .default_value("0")
                .help("Bytecode index the exception is raised at"),
        )
        .arg(
            Arg::new("caller-pc")
                .long("caller-pc")
                .value_name("INDEX")
                .value_parser(value_parser!(u16))
                .default_value("0")
                .help("Bytecode index of the call in the calling method"),
        )
        .arg(
            Arg::new("max-stack")
                .long("max-stack")
                .value_name("SLOTS")
                .value_parser(value_parser!(u16))
                .default_value("1")
                .help("Operand stack size of both methods"),
        )
        .arg(
            Arg::new("heap-limit")
                .long("heap-limit")
                .value_name("OBJECTS")
                .value_parser(value_parser!(usize))
                .help("Maximum number of objects on the heap"),
        )
        .arg(
            Arg::new("thread-name")
                .long("thread-name")
                .value_name("NAME")
                .help("Name of the thread, as shown in uncaught exception reports"),
        )
        .arg(
            Arg::new("exit-code")
                .long("exit-code")
                .value_name("CODE")
                .value_parser(value_parser!(i32))
                .help("Exit status after an uncaught exception"),
        )
        .get_matches();

    let mut settings = Settings::new();
    if let Some(heap_limit) = matches.get_one::<usize>("heap-limit") {
        settings.heap_limit = *heap_limit;
    }
    if let Some(thread_name) = matches.get_one::<String>("thread-name") {
        settings.main_thread_name = thread_name.clone();
    }
    if let Some(exit_code) = matches.get_one::<i32>("exit-code") {
        settings.uncaught_exit_code = *exit_code;
    }
    log::debug!("Settings: {:?}", settings);

    let catches: Vec<CatchArg> = matches
        .get_many::<CatchArg>("catch")
        .map_or_else(Vec::new, |catches| catches.cloned().collect());
    let caller_catches: Vec<CatchArg> = matches
        .get_many::<CatchArg>("caller-catch")
        .map_or_else(Vec::new, |catches| catches.cloned().collect());
    let max_stack = *matches.get_one::<u16>("max-stack").unwrap_or(&1);
    let pc = *matches.get_one::<u16>("pc").unwrap_or(&0);
    let caller_pc = *matches.get_one::<u16>("caller-pc").unwrap_or(&0);

    let arenas = ClassGraphArenas::new();
    let class_graph = ClassGraph::new(&arenas);
    let java = class_graph.insert_java_library_types();

    let mut constants = ConstantPool::new();
    let work_table = match exception_table(&mut constants, &catches) {
        Ok(table) => table,
        Err(err) => usage_error(&err),
    };
    let main_table = match exception_table(&mut constants, &caller_catches) {
        Ok(table) => table,
        Err(err) => usage_error(&err),
    };
    let main_class = class_graph.add_class(ClassData::new(
        BinaryName::from_string(String::from("me/alec/Main")).map_err(invalid_input)?,
        java.lang.object,
        ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        constants,
    ));
    let main = add_method(&class_graph, main_class, "main", max_stack, main_table)?;
    let work = add_method(&class_graph, main_class, "work", max_stack, work_table)?;

    let source = if let Some(kind) = matches.get_one::<ExceptionKind>("kind") {
        Source::Kind(*kind)
    } else if let Some(class) = matches.get_one::<String>("throw") {
        let class = match BinaryName::from_java_name(class)
            .map_err(jthrow::jvm::Error::MalformedName)
            .and_then(|name| class_graph.load_class(&name))
        {
            Ok(class) if class.is_throwable() => class,
            Ok(class) => usage_error(&format!("{:?} is not throwable", class)),
            Err(err) => usage_error(&err.to_string()),
        };
        Source::Object {
            class,
            message: matches.get_one::<String>("message").cloned(),
        }
    } else {
        Source::Null
    };

    let mut vm = Vm::new(&class_graph, settings);
    let mut thread = Thread::main(&vm.settings);
    for (method, at) in [(main, caller_pc), (work, pc)] {
        match thread.push_frame(method, None) {
            Ok(frame) => frame.pc = BytecodeIndex(at),
            Err(err) => usage_error(&err.to_string()),
        }
    }

    let raised = match source {
        Source::Kind(kind) => thread.raise_by_kind(&mut vm, kind),
        Source::Null => thread.raise(&mut vm, None),
        Source::Object { class, message } => {
            match vm.new_throwable(class, message.as_deref()) {
                Ok(exception) => thread.raise(&mut vm, Some(exception)),
                Err(err) => usage_error(&err.to_string()),
            }
        }
    };

    match raised {
        Ok(raised) => report(&thread, raised),
        Err(fatal) => {
            log::info!("Terminating: {}", fatal);
            fatal.terminate(&vm.settings)
        }
    }
}

fn exception_table(
    constants: &mut ConstantPool,
    catches: &[CatchArg],
) -> Result<Vec<ExceptionHandler>, String> {
    let mut table = Vec::with_capacity(catches.len());
    for catch in catches {
        let catch_type = match &catch.catch_type {
            None => None,
            Some(name) => Some(
                constants
                    .get_class(name)
                    .map_err(|err| jthrow::jvm::Error::from(err).to_string())?,
            ),
        };
        table.push(ExceptionHandler {
            start_pc: BytecodeIndex(catch.start_pc),
            end_pc: BytecodeIndex(catch.end_pc),
            handler_pc: BytecodeIndex(catch.handler_pc),
            catch_type,
        });
    }
    Ok(table)
}

/// Add `static void <name>()` with the given exception table
fn add_method<'g>(
    class_graph: &ClassGraph<'g>,
    class: ClassId<'g>,
    name: &str,
    max_stack: u16,
    exception_table: Vec<ExceptionHandler>,
) -> io::Result<MethodId<'g>> {
    Ok(class_graph.add_method(MethodData {
        class,
        name: UnqualifiedName::from_string(name.to_owned()).map_err(invalid_input)?,
        descriptor: "()V".into(),
        access_flags: MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
        code: Some(Code {
            max_stack,
            max_locals: 0,
            exception_table,
        }),
    }))
}

fn report(thread: &Thread<'_>, raised: Raised) -> io::Result<()> {
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut s = stdout.lock();
    match raised {
        Raised::Caught {
            handler_pc,
            depth,
            frames_popped,
        } => {
            let method = thread.current_frame().map(|frame| frame.method);
            s.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(s, "caught")?;
            s.set_color(ColorSpec::new().set_bold(true))?;
            if let Some(method) = method {
                write!(s, " {}.{:?}", method.class.name, method.name)?;
            }
            s.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(
                s,
                " [handler {}, depth {}, {} frame(s) popped]",
                handler_pc, depth, frames_popped
            )?;
        }
        Raised::ConstructorScheduled => {
            s.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(s, "constructor scheduled")?;
        }
    }
    s.reset()?;
    Ok(())
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn usage_error(message: &str) -> ! {
    log::error!("{}", message);
    eprintln!("error: {}", message);
    exit(2)
}
