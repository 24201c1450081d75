use super::class_file::{Code, ConstantPool};
use super::{
    BinaryName, ClassAccessFlags, Error, FieldAccessFlags, MethodAccessFlags, Name,
    UnqualifiedName,
};
use crate::util::RefId;
use elsa::map::FrozenMap;
use elsa::FrozenVec;
use std::borrow::Cow;
use std::fmt;
use std::fmt::Debug;
use typed_arena::Arena;

mod assignable;
mod java_classes;

pub use assignable::*;
pub use java_classes::*;

pub struct ClassGraphArenas<'g> {
    class_arena: Arena<ClassData<'g>>,
    method_arena: Arena<MethodData<'g>>,
    field_arena: Arena<FieldData<'g>>,
}

impl<'g> ClassGraphArenas<'g> {
    pub fn new() -> Self {
        ClassGraphArenas {
            class_arena: Arena::new(),
            method_arena: Arena::new(),
            field_arena: Arena::new(),
        }
    }
}

impl<'g> Default for ClassGraphArenas<'g> {
    fn default() -> Self {
        ClassGraphArenas::new()
    }
}

pub type ClassId<'g> = RefId<'g, ClassData<'g>>;
pub type MethodId<'g> = RefId<'g, MethodData<'g>>;
pub type FieldId<'g> = RefId<'g, FieldData<'g>>;

/// Classes loaded into the runtime, and the members on those classes
///
/// This is the class loader as far as exception dispatch is concerned: it resolves class names
/// (from the exception kind registry, or from `catch` clauses in exception tables) to classes,
/// and the classes it hands out know their superclasses and interfaces for "is-a" queries.
///
/// Everything is arena allocated, so classes can be added through a shared reference and the
/// handles returned stay valid for as long as the arenas do.
pub struct ClassGraph<'g> {
    arenas: &'g ClassGraphArenas<'g>,
    classes: FrozenMap<&'g BinaryName, ClassId<'g>>,
}

impl<'g> ClassGraph<'g> {
    /// New empty graph
    pub fn new(arenas: &'g ClassGraphArenas<'g>) -> Self {
        ClassGraph {
            arenas,
            classes: FrozenMap::new(),
        }
    }

    /// Resolve a class by name
    ///
    /// Loading the same name twice produces the same class.
    pub fn load_class(&'g self, name: &BinaryName) -> Result<ClassId<'g>, Error> {
        match self.classes.get(name) {
            Some(class) => Ok(RefId(class)),
            None => {
                log::debug!("Class {:?} is not in the class graph", name);
                Err(Error::MissingClass(name.as_str().to_owned()))
            }
        }
    }

    /// Resolve a class by a name that hasn't been validated yet
    pub fn load_class_named(&'g self, name: &str) -> Result<ClassId<'g>, Error> {
        let name = BinaryName::from_string(name.to_owned()).map_err(Error::MalformedName)?;
        self.load_class(&name)
    }

    /// Is this object type throwable?
    pub fn is_throwable(class: ClassId<'g>) -> bool {
        let mut next_class = Some(class);
        while let Some(class) = next_class {
            if class.name == BinaryName::THROWABLE {
                return true;
            }
            next_class = class.superclass;
        }

        false
    }

    /// Add a new class to the class graph
    ///
    /// If a class by the same name was already added, the graph keeps resolving the name to the
    /// first one.
    pub fn add_class(&self, data: ClassData<'g>) -> ClassId<'g> {
        let data: &'g ClassData<'g> = self.arenas.class_arena.alloc(data);
        if self.classes.get(&data.name).is_some() {
            log::warn!("Class {:?} is already in the class graph", data.name);
        }
        self.classes.insert(&data.name, RefId(data));
        RefId(data)
    }

    /// Add a field to the class graph and to its class
    pub fn add_field(&self, field: FieldData<'g>) -> FieldId<'g> {
        let data: &'g FieldData<'g> = self.arenas.field_arena.alloc(field);
        data.class.0.fields.push(data);
        RefId(data)
    }

    /// Add a method to the class graph and to its class
    ///
    /// A method with the same name, descriptor, and staticness as an existing one on the class is
    /// not added again, and the existing one is returned instead.
    pub fn add_method(&self, method: MethodData<'g>) -> MethodId<'g> {
        for existing in &method.class.0.methods {
            if existing.name == method.name
                && existing.descriptor == method.descriptor
                && existing.is_static() == method.is_static()
            {
                return RefId(existing);
            }
        }

        let data: &'g MethodData<'g> = self.arenas.method_arena.alloc(method);
        data.class.0.methods.push(data);
        RefId(data)
    }

    /// Add standard types to the class graph
    pub fn insert_java_library_types(&self) -> JavaClasses<'g> {
        JavaClasses::add_to_graph(self)
    }
}

pub struct ClassData<'g> {
    /// Name of the class
    pub name: BinaryName,

    /// Superclass is only ever missing for `java/lang/Object` itself
    pub superclass: Option<ClassId<'g>>,

    /// Interfaces implemented (or super-interfaces)
    pub interfaces: FrozenVec<&'g ClassData<'g>>,

    /// Access flags
    pub access_flags: ClassAccessFlags,

    /// Constant pool, which exception tables of this class' methods index into
    pub constants: ConstantPool,

    /// Methods
    pub methods: FrozenVec<&'g MethodData<'g>>,

    /// Fields (static and instance), in declaration order
    pub fields: FrozenVec<&'g FieldData<'g>>,
}

impl<'g> ClassData<'g> {
    pub fn new(
        name: BinaryName,
        superclass: ClassId<'g>,
        access_flags: ClassAccessFlags,
        constants: ConstantPool,
    ) -> ClassData<'g> {
        ClassData {
            name,
            superclass: Some(superclass),
            interfaces: FrozenVec::new(),
            access_flags,
            constants,
            methods: FrozenVec::new(),
            fields: FrozenVec::new(),
        }
    }

    /// Is this an interface?
    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlags::INTERFACE)
    }
}

impl<'g> RefId<'g, ClassData<'g>> {
    /// Find a method declared directly on this class
    pub fn find_method(self, name: &UnqualifiedName, descriptor: &str) -> Option<MethodId<'g>> {
        for method in &self.0.methods {
            if &method.name == name && method.descriptor == descriptor {
                return Some(RefId(method));
            }
        }
        None
    }

    /// Instance fields of objects of this class, in slot order
    ///
    /// Fields inherited from superclasses come first, so slot 0 of any subclass of
    /// `java/lang/Throwable` is `detailMessage`.
    pub fn instance_fields(self) -> Vec<FieldId<'g>> {
        let mut hierarchy = vec![self];
        let mut next_class = self.superclass;
        while let Some(class) = next_class {
            hierarchy.push(class);
            next_class = class.superclass;
        }

        let mut fields = vec![];
        for class in hierarchy.into_iter().rev() {
            for field in &class.0.fields {
                if !field.is_static() {
                    fields.push(RefId(field));
                }
            }
        }
        fields
    }

    /// Slot of the named instance field in objects of this class
    pub fn field_slot(self, name: &UnqualifiedName) -> Option<usize> {
        self.instance_fields()
            .iter()
            .position(|field| &field.name == name)
    }

    /// Is this class `java/lang/Throwable` or a subclass of it?
    pub fn is_throwable(self) -> bool {
        ClassGraph::is_throwable(self)
    }
}

impl<'g> PartialEq for ClassData<'g> {
    fn eq(&self, other: &ClassData<'g>) -> bool {
        self.name == other.name
    }
}

impl<'g> Eq for ClassData<'g> {}

impl<'g> Debug for ClassData<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

pub struct MethodData<'g> {
    /// Class
    pub class: ClassId<'g>,

    /// Name of the method
    pub name: UnqualifiedName,

    /// Type of the method (eg. `()V`)
    pub descriptor: Cow<'static, str>,

    pub access_flags: MethodAccessFlags,

    /// Code attribute, missing for `native` and `abstract` methods
    pub code: Option<Code>,
}

impl<'g> MethodData<'g> {
    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }
}

impl<'g> Debug for MethodData<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}.{}:{}",
            self.class.name.as_str(),
            self.name.as_str(),
            self.descriptor,
        ))
    }
}

pub struct FieldData<'g> {
    /// Class
    ///
    /// Note: this is a pointer back to the class (so don't derive `Debug`)
    pub class: ClassId<'g>,

    /// Name of the field
    pub name: UnqualifiedName,

    /// Type of the field (eg. `Ljava/lang/String;`)
    pub descriptor: Cow<'static, str>,

    pub access_flags: FieldAccessFlags,
}

impl<'g> FieldData<'g> {
    pub fn is_static(&self) -> bool {
        self.access_flags.contains(FieldAccessFlags::STATIC)
    }
}

impl<'g> Debug for FieldData<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}.{}:{}",
            self.class.name.as_str(),
            self.name.as_str(),
            self.descriptor,
        ))
    }
}
