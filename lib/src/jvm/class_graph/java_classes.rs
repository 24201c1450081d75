use super::{ClassData, ClassGraph, ClassId, FieldData, MethodData};
use crate::jvm::class_file::ConstantPool;
use crate::jvm::{
    BinaryName, ClassAccessFlags, FieldAccessFlags, MethodAccessFlags, UnqualifiedName,
};
use elsa::FrozenVec;
use std::borrow::Cow;

/// Classes inside `java.*` that the runtime itself depends on
///
/// This is every class an exception kind can be synthesized as, along with the part of the
/// hierarchy above them (so that `catch (RuntimeException e)` catches an `ArithmeticException`).
pub struct JavaClasses<'g> {
    pub lang: LangClasses<'g>,
    pub io: IoClasses<'g>,
}

/// Classes inside `java.lang.*`
pub struct LangClasses<'g> {
    pub object: ClassId<'g>,
    pub char_sequence: ClassId<'g>,
    pub string: ClassId<'g>,
    pub throwable: ClassId<'g>,
    pub exception: ClassId<'g>,
    pub error: ClassId<'g>,
    pub runtime_exception: ClassId<'g>,
    pub linkage_error: ClassId<'g>,
    pub virtual_machine_error: ClassId<'g>,
    pub reflective_operation_exception: ClassId<'g>,
    pub illegal_argument_exception: ClassId<'g>,
    pub index_out_of_bounds_exception: ClassId<'g>,
    pub null_pointer_exception: ClassId<'g>,
    pub array_index_out_of_bounds_exception: ClassId<'g>,
    pub string_index_out_of_bounds_exception: ClassId<'g>,
    pub incompatible_class_change_error: ClassId<'g>,
    pub negative_array_size_exception: ClassId<'g>,
    pub out_of_memory_error: ClassId<'g>,
    pub stack_overflow_error: ClassId<'g>,
    pub class_not_found_exception: ClassId<'g>,
    pub arithmetic_exception: ClassId<'g>,
    pub no_such_field_error: ClassId<'g>,
    pub no_such_method_error: ClassId<'g>,
    pub interrupted_exception: ClassId<'g>,
    pub number_format_exception: ClassId<'g>,
}

/// Classes inside `java.io.*`
pub struct IoClasses<'g> {
    pub serializable: ClassId<'g>,
    pub io_exception: ClassId<'g>,
    pub file_not_found_exception: ClassId<'g>,
}

impl<'g> JavaClasses<'g> {
    pub fn add_to_graph(class_graph: &ClassGraph<'g>) -> JavaClasses<'g> {
        let object = class_graph.add_class(ClassData {
            name: BinaryName::OBJECT,
            superclass: None,
            interfaces: FrozenVec::new(),
            access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
            constants: ConstantPool::new(),
            methods: FrozenVec::new(),
            fields: FrozenVec::new(),
        });
        add_native_constructor(class_graph, object, "()V");

        let serializable = class_graph.add_class(ClassData::new(
            BinaryName::SERIALIZABLE,
            object,
            ClassAccessFlags::PUBLIC | ClassAccessFlags::INTERFACE | ClassAccessFlags::ABSTRACT,
            ConstantPool::new(),
        ));
        let lang = LangClasses::add_to_graph(class_graph, object, serializable);
        let io = IoClasses::add_to_graph(class_graph, serializable, lang.exception);

        JavaClasses { lang, io }
    }
}

impl<'g> LangClasses<'g> {
    pub fn add_to_graph(
        class_graph: &ClassGraph<'g>,
        object: ClassId<'g>,
        serializable: ClassId<'g>,
    ) -> LangClasses<'g> {
        let char_sequence = class_graph.add_class(ClassData::new(
            BinaryName::CHARSEQUENCE,
            object,
            ClassAccessFlags::PUBLIC | ClassAccessFlags::INTERFACE | ClassAccessFlags::ABSTRACT,
            ConstantPool::new(),
        ));

        let string = class_graph.add_class(ClassData::new(
            BinaryName::STRING,
            object,
            ClassAccessFlags::SUPER | ClassAccessFlags::PUBLIC | ClassAccessFlags::FINAL,
            ConstantPool::new(),
        ));
        string.interfaces.push(serializable.0);
        string.interfaces.push(char_sequence.0);
        add_field(class_graph, string, UnqualifiedName::VALUE, "[C");
        add_native_constructor(class_graph, string, "()V");

        let throwable = class_graph.add_class(ClassData::new(
            BinaryName::THROWABLE,
            object,
            ClassAccessFlags::SUPER | ClassAccessFlags::PUBLIC,
            ConstantPool::new(),
        ));
        throwable.interfaces.push(serializable.0);
        add_field(
            class_graph,
            throwable,
            UnqualifiedName::DETAILMESSAGE,
            "Ljava/lang/String;",
        );
        add_field(
            class_graph,
            throwable,
            UnqualifiedName::CAUSE,
            "Ljava/lang/Throwable;",
        );
        add_native_constructor(class_graph, throwable, "()V");
        add_native_constructor(class_graph, throwable, "(Ljava/lang/String;)V");

        let throwable_class = |name: BinaryName, superclass: ClassId<'g>| -> ClassId<'g> {
            let class = class_graph.add_class(ClassData::new(
                name,
                superclass,
                ClassAccessFlags::SUPER | ClassAccessFlags::PUBLIC,
                ConstantPool::new(),
            ));
            add_native_constructor(class_graph, class, "()V");
            add_native_constructor(class_graph, class, "(Ljava/lang/String;)V");
            class
        };

        let exception = throwable_class(BinaryName::EXCEPTION, throwable);
        let error = throwable_class(BinaryName::ERROR, throwable);
        let runtime_exception = throwable_class(BinaryName::RUNTIMEEXCEPTION, exception);
        let linkage_error = throwable_class(BinaryName::LINKAGEERROR, error);
        let virtual_machine_error = throwable_class(BinaryName::VIRTUALMACHINEERROR, error);
        let reflective_operation_exception =
            throwable_class(BinaryName::REFLECTIVEOPERATIONEXCEPTION, exception);
        let illegal_argument_exception =
            throwable_class(BinaryName::ILLEGALARGUMENTEXCEPTION, runtime_exception);
        let index_out_of_bounds_exception =
            throwable_class(BinaryName::INDEXOUTOFBOUNDSEXCEPTION, runtime_exception);

        let null_pointer_exception =
            throwable_class(BinaryName::NULLPOINTEREXCEPTION, runtime_exception);
        let array_index_out_of_bounds_exception = throwable_class(
            BinaryName::ARRAYINDEXOUTOFBOUNDSEXCEPTION,
            index_out_of_bounds_exception,
        );
        let string_index_out_of_bounds_exception = throwable_class(
            BinaryName::STRINGINDEXOUTOFBOUNDSEXCEPTION,
            index_out_of_bounds_exception,
        );
        let incompatible_class_change_error =
            throwable_class(BinaryName::INCOMPATIBLECLASSCHANGEERROR, linkage_error);
        let negative_array_size_exception =
            throwable_class(BinaryName::NEGATIVEARRAYSIZEEXCEPTION, runtime_exception);
        let out_of_memory_error =
            throwable_class(BinaryName::OUTOFMEMORYERROR, virtual_machine_error);
        let stack_overflow_error =
            throwable_class(BinaryName::STACKOVERFLOWERROR, virtual_machine_error);
        let class_not_found_exception = throwable_class(
            BinaryName::CLASSNOTFOUNDEXCEPTION,
            reflective_operation_exception,
        );
        let arithmetic_exception =
            throwable_class(BinaryName::ARITHMETICEXCEPTION, runtime_exception);
        let no_such_field_error =
            throwable_class(BinaryName::NOSUCHFIELDERROR, incompatible_class_change_error);
        let no_such_method_error =
            throwable_class(BinaryName::NOSUCHMETHODERROR, incompatible_class_change_error);
        let interrupted_exception = throwable_class(BinaryName::INTERRUPTEDEXCEPTION, exception);
        let number_format_exception =
            throwable_class(BinaryName::NUMBERFORMATEXCEPTION, illegal_argument_exception);

        LangClasses {
            object,
            char_sequence,
            string,
            throwable,
            exception,
            error,
            runtime_exception,
            linkage_error,
            virtual_machine_error,
            reflective_operation_exception,
            illegal_argument_exception,
            index_out_of_bounds_exception,
            null_pointer_exception,
            array_index_out_of_bounds_exception,
            string_index_out_of_bounds_exception,
            incompatible_class_change_error,
            negative_array_size_exception,
            out_of_memory_error,
            stack_overflow_error,
            class_not_found_exception,
            arithmetic_exception,
            no_such_field_error,
            no_such_method_error,
            interrupted_exception,
            number_format_exception,
        }
    }
}

impl<'g> IoClasses<'g> {
    pub fn add_to_graph(
        class_graph: &ClassGraph<'g>,
        serializable: ClassId<'g>,
        exception: ClassId<'g>,
    ) -> IoClasses<'g> {
        let io_exception = class_graph.add_class(ClassData::new(
            BinaryName::IOEXCEPTION,
            exception,
            ClassAccessFlags::SUPER | ClassAccessFlags::PUBLIC,
            ConstantPool::new(),
        ));
        add_native_constructor(class_graph, io_exception, "()V");
        add_native_constructor(class_graph, io_exception, "(Ljava/lang/String;)V");

        let file_not_found_exception = class_graph.add_class(ClassData::new(
            BinaryName::FILENOTFOUNDEXCEPTION,
            io_exception,
            ClassAccessFlags::SUPER | ClassAccessFlags::PUBLIC,
            ConstantPool::new(),
        ));
        add_native_constructor(class_graph, file_not_found_exception, "()V");
        add_native_constructor(class_graph, file_not_found_exception, "(Ljava/lang/String;)V");

        IoClasses {
            serializable,
            io_exception,
            file_not_found_exception,
        }
    }
}

/// Library constructors have no bytecode: the runtime zeroes fresh objects, which is all the
/// no-argument constructors of these classes need
fn add_native_constructor<'g>(
    class_graph: &ClassGraph<'g>,
    class: ClassId<'g>,
    descriptor: &'static str,
) {
    class_graph.add_method(MethodData {
        class,
        name: UnqualifiedName::INIT,
        descriptor: Cow::Borrowed(descriptor),
        access_flags: MethodAccessFlags::PUBLIC | MethodAccessFlags::NATIVE,
        code: None,
    });
}

fn add_field<'g>(
    class_graph: &ClassGraph<'g>,
    class: ClassId<'g>,
    name: UnqualifiedName,
    descriptor: &'static str,
) {
    class_graph.add_field(FieldData {
        class,
        name,
        descriptor: Cow::Borrowed(descriptor),
        access_flags: FieldAccessFlags::PRIVATE,
    });
}
