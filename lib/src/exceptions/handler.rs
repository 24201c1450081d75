use crate::jvm::class_file::{BytecodeIndex, ConstantPool, ExceptionHandler};
use crate::jvm::class_graph::{Assignable, ClassGraph, ClassId};

/// First handler in an exception table that catches `thrown` at `pc`
///
/// A handler matches when its (inclusive) range covers `pc` and `thrown` is assignable to its
/// catch type. Handlers without a catch type match everything. Catch types are resolved through
/// `constants` (the pool of the class declaring the method) and loaded from `classes`; a catch
/// type that can't be resolved or loaded catches nothing.
pub fn find_handler<'a, 'g>(
    exception_table: &'a [ExceptionHandler],
    constants: &ConstantPool,
    pc: BytecodeIndex,
    thrown: ClassId<'g>,
    classes: &'g ClassGraph<'g>,
) -> Option<&'a ExceptionHandler> {
    exception_table.iter().find(|handler| {
        if !handler.covers(pc) {
            return false;
        }
        let catch_type = match handler.catch_type {
            None => return true,
            Some(catch_type) => catch_type,
        };

        let catch_class = constants
            .class_name(catch_type)
            .and_then(|name| classes.load_class_named(name));
        match catch_class {
            Ok(catch_class) => thrown.is_assignable(&catch_class),
            Err(err) => {
                log::debug!(
                    "Skipping handler at {} for {:?}: unresolvable catch type ({})",
                    handler.handler_pc,
                    thrown,
                    err
                );
                false
            }
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::class_graph::ClassGraphArenas;
    use crate::jvm::{BinaryName, Name};

    fn handler(
        start: u16,
        end: u16,
        target: u16,
        catch_type: Option<crate::jvm::class_file::ClassConstantIndex>,
    ) -> ExceptionHandler {
        ExceptionHandler {
            start_pc: BytecodeIndex(start),
            end_pc: BytecodeIndex(end),
            handler_pc: BytecodeIndex(target),
            catch_type,
        }
    }

    #[test]
    fn range_and_type_must_both_match() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();

        let mut constants = ConstantPool::new();
        let arithmetic = constants
            .get_class(&BinaryName::ARITHMETICEXCEPTION)
            .unwrap();
        let table = vec![handler(0, 10, 20, Some(arithmetic))];

        let at = |pc: u16, thrown| {
            find_handler(&table, &constants, BytecodeIndex(pc), thrown, &class_graph)
                .map(|handler| handler.handler_pc)
        };
        assert_eq!(at(5, java.lang.arithmetic_exception), Some(BytecodeIndex(20)));
        assert_eq!(at(0, java.lang.arithmetic_exception), Some(BytecodeIndex(20)));
        assert_eq!(at(10, java.lang.arithmetic_exception), Some(BytecodeIndex(20)));
        assert_eq!(at(15, java.lang.arithmetic_exception), None);
        assert_eq!(at(5, java.lang.null_pointer_exception), None);
        assert_eq!(at(5, java.lang.runtime_exception), None);
    }

    #[test]
    fn subclasses_and_catch_all() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();

        let mut constants = ConstantPool::new();
        let runtime = constants.get_class(&BinaryName::RUNTIMEEXCEPTION).unwrap();
        let io = constants.get_class(&BinaryName::IOEXCEPTION).unwrap();
        let table = vec![
            handler(0, 10, 20, Some(io)),
            handler(0, 10, 30, Some(runtime)),
            handler(0, 40, 50, None),
        ];

        let at = |pc: u16, thrown| {
            find_handler(&table, &constants, BytecodeIndex(pc), thrown, &class_graph)
                .map(|handler| handler.handler_pc)
        };
        assert_eq!(at(5, java.io.file_not_found_exception), Some(BytecodeIndex(20)));
        assert_eq!(at(5, java.lang.arithmetic_exception), Some(BytecodeIndex(30)));
        assert_eq!(at(5, java.lang.out_of_memory_error), Some(BytecodeIndex(50)));
        assert_eq!(at(35, java.lang.arithmetic_exception), Some(BytecodeIndex(50)));
        assert_eq!(at(41, java.lang.arithmetic_exception), None);
    }

    #[test]
    fn unresolvable_catch_types_catch_nothing() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();

        let mut constants = ConstantPool::new();
        let missing = constants
            .get_class(&BinaryName::from_string(String::from("me/alec/Missing")).unwrap())
            .unwrap();
        let not_a_class = constants.get_integer(7).unwrap();
        let throwable = constants.get_class(&BinaryName::THROWABLE).unwrap();
        let table = vec![
            handler(0, 10, 20, Some(missing)),
            handler(
                0,
                10,
                30,
                Some(crate::jvm::class_file::ClassConstantIndex(not_a_class)),
            ),
            handler(0, 10, 40, Some(throwable)),
        ];

        let found = find_handler(
            &table,
            &constants,
            BytecodeIndex(3),
            java.lang.stack_overflow_error,
            &class_graph,
        );
        assert_eq!(found.map(|handler| handler.handler_pc), Some(BytecodeIndex(40)));
    }
}
