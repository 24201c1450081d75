use crate::jvm::{BinaryName, Name};
use std::fmt;

/// Exceptions the runtime raises on its own, when it detects a fault in the interpreted program
///
/// The discriminants are stable (declaration order) so that an interpreter can pass kinds around
/// as bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExceptionKind {
    NullPointer,
    IndexOutOfBounds,
    ArrayIndexOutOfBounds,
    IncompatibleClassChange,
    NegativeArraySize,
    OutOfMemory,
    ClassNotFound,
    Arithmetic,
    NoSuchField,
    NoSuchMethod,
    Runtime,
    Io,
    FileNotFound,
    Interrupted,
    NumberFormat,
    StringIndexOutOfBounds,
    StackOverflow,
}

impl ExceptionKind {
    /// Every kind, in declaration order
    pub const ALL: [ExceptionKind; 17] = [
        ExceptionKind::NullPointer,
        ExceptionKind::IndexOutOfBounds,
        ExceptionKind::ArrayIndexOutOfBounds,
        ExceptionKind::IncompatibleClassChange,
        ExceptionKind::NegativeArraySize,
        ExceptionKind::OutOfMemory,
        ExceptionKind::ClassNotFound,
        ExceptionKind::Arithmetic,
        ExceptionKind::NoSuchField,
        ExceptionKind::NoSuchMethod,
        ExceptionKind::Runtime,
        ExceptionKind::Io,
        ExceptionKind::FileNotFound,
        ExceptionKind::Interrupted,
        ExceptionKind::NumberFormat,
        ExceptionKind::StringIndexOutOfBounds,
        ExceptionKind::StackOverflow,
    ];

    /// Class instantiated when this kind is raised
    pub fn class_name(self) -> BinaryName {
        match self {
            ExceptionKind::NullPointer => BinaryName::NULLPOINTEREXCEPTION,
            ExceptionKind::IndexOutOfBounds => BinaryName::INDEXOUTOFBOUNDSEXCEPTION,
            ExceptionKind::ArrayIndexOutOfBounds => BinaryName::ARRAYINDEXOUTOFBOUNDSEXCEPTION,
            ExceptionKind::IncompatibleClassChange => BinaryName::INCOMPATIBLECLASSCHANGEERROR,
            ExceptionKind::NegativeArraySize => BinaryName::NEGATIVEARRAYSIZEEXCEPTION,
            ExceptionKind::OutOfMemory => BinaryName::OUTOFMEMORYERROR,
            ExceptionKind::ClassNotFound => BinaryName::CLASSNOTFOUNDEXCEPTION,
            ExceptionKind::Arithmetic => BinaryName::ARITHMETICEXCEPTION,
            ExceptionKind::NoSuchField => BinaryName::NOSUCHFIELDERROR,
            ExceptionKind::NoSuchMethod => BinaryName::NOSUCHMETHODERROR,
            ExceptionKind::Runtime => BinaryName::RUNTIMEEXCEPTION,
            ExceptionKind::Io => BinaryName::IOEXCEPTION,
            ExceptionKind::FileNotFound => BinaryName::FILENOTFOUNDEXCEPTION,
            ExceptionKind::Interrupted => BinaryName::INTERRUPTEDEXCEPTION,
            ExceptionKind::NumberFormat => BinaryName::NUMBERFORMATEXCEPTION,
            ExceptionKind::StringIndexOutOfBounds => BinaryName::STRINGINDEXOUTOFBOUNDSEXCEPTION,
            ExceptionKind::StackOverflow => BinaryName::STACKOVERFLOWERROR,
        }
    }

    /// Numeric id, in declaration order (the inverse of `TryFrom<u8>`)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Find the kind whose class has exactly this name
    ///
    /// The name may be given in internal form (`java/lang/ArithmeticException`), in source form
    /// (`java.lang.ArithmeticException`), or as just the simple name (`ArithmeticException`).
    /// Partial names never match: `Exception` and `OutOfBounds` are not kinds.
    pub fn from_class_name(name: &str) -> Option<ExceptionKind> {
        let internal = name.replace('.', "/");
        let matches = |kind: &ExceptionKind| {
            let class_name = kind.class_name();
            if internal.contains('/') {
                class_name.as_str() == internal
            } else {
                class_name.simple_name() == internal
            }
        };
        ExceptionKind::ALL.iter().copied().find(|kind| matches(kind))
    }
}

impl TryFrom<u8> for ExceptionKind {
    type Error = u8;

    fn try_from(id: u8) -> Result<ExceptionKind, u8> {
        ExceptionKind::ALL.get(id as usize).copied().ok_or(id)
    }
}

/// Prints the class name of the kind
impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name().as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for (id, kind) in ExceptionKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, id);
            assert_eq!(ExceptionKind::try_from(id as u8), Ok(*kind));
        }
        assert_eq!(ExceptionKind::try_from(17), Err(17));
    }

    #[test]
    fn every_kind_is_fully_qualified() {
        for kind in ExceptionKind::ALL {
            let name = kind.class_name();
            assert!(
                name.as_str().starts_with("java/lang/") || name.as_str().starts_with("java/io/"),
                "{} is not fully qualified",
                name
            );
        }
        assert_eq!(
            ExceptionKind::IncompatibleClassChange.class_name(),
            BinaryName::INCOMPATIBLECLASSCHANGEERROR
        );
        assert_eq!(
            ExceptionKind::FileNotFound.to_string(),
            "java/io/FileNotFoundException"
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(
            ExceptionKind::from_class_name("java/lang/ArithmeticException"),
            Some(ExceptionKind::Arithmetic)
        );
        assert_eq!(
            ExceptionKind::from_class_name("java.io.IOException"),
            Some(ExceptionKind::Io)
        );
        assert_eq!(
            ExceptionKind::from_class_name("IndexOutOfBoundsException"),
            Some(ExceptionKind::IndexOutOfBounds)
        );
        assert_eq!(
            ExceptionKind::from_class_name("ArrayIndexOutOfBoundsException"),
            Some(ExceptionKind::ArrayIndexOutOfBounds)
        );

        assert_eq!(ExceptionKind::from_class_name("Exception"), None);
        assert_eq!(ExceptionKind::from_class_name("OutOfBounds"), None);
        assert_eq!(ExceptionKind::from_class_name("lang/ArithmeticException"), None);
        assert_eq!(ExceptionKind::from_class_name("me/alec/IOException"), None);
        assert_eq!(ExceptionKind::from_class_name(""), None);
    }
}
