use crate::runtime::{ObjectModel, ObjectRef};

/// Slot of `detailMessage` in every `java/lang/Throwable`
const DETAIL_MESSAGE_SLOT: usize = 0;

/// Slot of `value` (the `char[]`) in a `java/lang/String`
const STRING_VALUE_SLOT: usize = 0;

/// Detail message of a throwable
///
/// Follows `detailMessage` to the message string and its `value` to the characters. If either
/// reference is `null` (or doesn't lead to an object of the right shape) there is no message.
/// Unpaired surrogates decode to U+FFFD.
pub fn extract_message<'g>(model: &impl ObjectModel<'g>, throwable: ObjectRef) -> Option<String> {
    let message = model.reference_field(throwable, DETAIL_MESSAGE_SLOT)?;
    let chars = model.reference_field(message, STRING_VALUE_SLOT)?;
    let chars = model.char_array(chars)?;
    Some(String::from_utf16_lossy(chars))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::class_graph::{ClassGraph, ClassGraphArenas};
    use crate::runtime::{Heap, Value};

    #[test]
    fn message_present() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();
        let mut heap = Heap::new(16, 0);

        let exception = heap.allocate(java.lang.runtime_exception).unwrap();
        let message = heap.allocate_string(java.lang.string, "boom").unwrap();
        heap.set_field(exception, 0, Value::Reference(Some(message)))
            .unwrap();

        assert_eq!(extract_message(&heap, exception).as_deref(), Some("boom"));
        assert_eq!(
            extract_message(&heap, exception),
            extract_message(&heap, exception)
        );
    }

    #[test]
    fn broken_links() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();
        let mut heap = Heap::new(16, 0);

        // `detailMessage` is null
        let exception = heap.allocate(java.lang.runtime_exception).unwrap();
        assert_eq!(extract_message(&heap, exception), None);

        // `detailMessage` is a string whose `value` is null
        let empty_string = heap.allocate(java.lang.string).unwrap();
        heap.set_field(exception, 0, Value::Reference(Some(empty_string)))
            .unwrap();
        assert_eq!(extract_message(&heap, exception), None);

        // `value` is not a `char[]`
        heap.set_field(empty_string, 0, Value::Reference(Some(exception)))
            .unwrap();
        assert_eq!(extract_message(&heap, exception), None);
    }

    #[test]
    fn empty_and_unpaired_messages() {
        let arenas = ClassGraphArenas::new();
        let class_graph = ClassGraph::new(&arenas);
        let java = class_graph.insert_java_library_types();
        let mut heap = Heap::new(16, 0);

        let exception = heap.allocate(java.lang.runtime_exception).unwrap();
        let message = heap.allocate(java.lang.string).unwrap();
        let chars = heap.allocate_char_array(vec![]).unwrap();
        heap.set_field(message, 0, Value::Reference(Some(chars)))
            .unwrap();
        heap.set_field(exception, 0, Value::Reference(Some(message)))
            .unwrap();
        assert_eq!(extract_message(&heap, exception).as_deref(), Some(""));

        let chars = heap
            .allocate_char_array(vec![0x0068, 0xD800, 0x0069])
            .unwrap();
        heap.set_field(message, 0, Value::Reference(Some(chars)))
            .unwrap();
        assert_eq!(
            extract_message(&heap, exception).as_deref(),
            Some("h\u{FFFD}i")
        );
    }
}
