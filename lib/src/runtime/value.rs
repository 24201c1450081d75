use crate::util::Width;
use std::fmt;

/// Handle to an object on the [`super::Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(pub(crate) usize);

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Value in a local variable, on an operand stack, or in a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Reference(Option<ObjectRef>),
}

impl Value {
    pub const NULL: Value = Value::Reference(None);

    /// Default value of a field with the given type descriptor
    ///
    /// `boolean`, `byte`, `char`, `short`, and `int` fields all start as `Int(0)`.
    pub fn zero_for_descriptor(descriptor: &str) -> Value {
        match descriptor.as_bytes().first() {
            Some(b'J') => Value::Long(0),
            Some(b'F') => Value::Float(0.0),
            Some(b'D') => Value::Double(0.0),
            Some(b'L') | Some(b'[') => Value::NULL,
            _ => Value::Int(0),
        }
    }

    /// Non-null reference held by this value, if any
    pub fn reference(&self) -> Option<ObjectRef> {
        match self {
            Value::Reference(reference) => *reference,
            _ => None,
        }
    }
}

/// `long` and `double` take two slots, as on the JVM
impl Width for Value {
    fn width(&self) -> usize {
        match self {
            Value::Long(_) | Value::Double(_) => 2,
            _ => 1,
        }
    }
}
