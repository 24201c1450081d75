use super::{Error, ObjectRef, Value};
use crate::jvm::class_graph::ClassId;
use crate::jvm::UnqualifiedName;

/// Objects on the heap
pub enum HeapObject<'g> {
    /// Instance of a class, with one value per instance field (see `ClassId::instance_fields`)
    Instance {
        class: ClassId<'g>,
        fields: Vec<Value>,
    },

    /// Backing storage of a `java/lang/String`
    CharArray(Vec<u16>),
}

/// Read-only view of objects, as needed to dispatch and report exceptions
///
/// Lookups that don't succeed (a dangling reference, a slot that is out of range or that doesn't
/// hold a non-null reference, an object of the wrong shape) return `None` rather than an error:
/// callers treat a broken link as "nothing there".
pub trait ObjectModel<'g> {
    /// Dynamic class of an instance
    fn runtime_class(&self, object: ObjectRef) -> Option<ClassId<'g>>;

    /// Reference stored in a field slot of an instance
    fn reference_field(&self, object: ObjectRef, slot: usize) -> Option<ObjectRef>;

    /// Contents of a `char[]`
    fn char_array(&self, object: ObjectRef) -> Option<&[u16]>;
}

/// Object storage, bounded by a number of objects
///
/// There is no collector: objects live as long as the heap. Past `limit` objects, only
/// [`Heap::allocate_reserved`] succeeds, and only for another `reserve` objects.
pub struct Heap<'g> {
    objects: Vec<HeapObject<'g>>,
    limit: usize,
    reserve: usize,
}

impl<'g> Heap<'g> {
    pub fn new(limit: usize, reserve: usize) -> Heap<'g> {
        Heap {
            objects: vec![],
            limit,
            reserve,
        }
    }

    /// Number of objects allocated so far
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn insert(&mut self, object: HeapObject<'g>, limit: usize) -> Result<ObjectRef, Error> {
        if self.objects.len() >= limit {
            log::debug!("Heap is full ({} objects)", limit);
            return Err(Error::OutOfMemory { limit });
        }
        let object_ref = ObjectRef(self.objects.len());
        self.objects.push(object);
        Ok(object_ref)
    }

    /// Allocate an instance of a class with every field set to its zero value
    pub fn allocate(&mut self, class: ClassId<'g>) -> Result<ObjectRef, Error> {
        self.allocate_within(class, self.limit)
    }

    /// Allocate an instance, dipping into the reserve if the heap is otherwise full
    ///
    /// This is how an `OutOfMemoryError` gets allocated once the heap is exhausted.
    pub fn allocate_reserved(&mut self, class: ClassId<'g>) -> Result<ObjectRef, Error> {
        self.allocate_within(class, self.limit + self.reserve)
    }

    fn allocate_within(&mut self, class: ClassId<'g>, limit: usize) -> Result<ObjectRef, Error> {
        let fields = class
            .instance_fields()
            .iter()
            .map(|field| Value::zero_for_descriptor(&field.descriptor))
            .collect();
        let object = self.insert(HeapObject::Instance { class, fields }, limit)?;
        log::trace!("Allocated {:?} at {}", class, object);
        Ok(object)
    }

    /// Allocate a `char[]`
    pub fn allocate_char_array(&mut self, chars: Vec<u16>) -> Result<ObjectRef, Error> {
        self.insert(HeapObject::CharArray(chars), self.limit)
    }

    /// Allocate a string instance of `string_class` backed by a fresh `char[]` holding `text`
    pub fn allocate_string(
        &mut self,
        string_class: ClassId<'g>,
        text: &str,
    ) -> Result<ObjectRef, Error> {
        let slot = string_class
            .field_slot(&UnqualifiedName::VALUE)
            .ok_or_else(|| {
                crate::jvm::Error::MissingMember(format!("{:?}.value", string_class))
            })?;
        if self.objects.len() + 2 > self.limit {
            log::debug!("No room for a string and its characters ({} objects)", self.limit);
            return Err(Error::OutOfMemory { limit: self.limit });
        }
        let chars = self.allocate_char_array(text.encode_utf16().collect())?;
        let string = self.allocate(string_class)?;
        self.set_field(string, slot, Value::Reference(Some(chars)))?;
        Ok(string)
    }

    pub fn get(&self, object: ObjectRef) -> Result<&HeapObject<'g>, Error> {
        self.objects
            .get(object.0)
            .ok_or(Error::InvalidReference(object))
    }

    /// Read a field of an instance
    pub fn field(&self, object: ObjectRef, slot: usize) -> Result<Value, Error> {
        match self.get(object)? {
            HeapObject::Instance { fields, .. } => fields
                .get(slot)
                .copied()
                .ok_or(Error::InvalidField { object, slot }),
            HeapObject::CharArray(_) => Err(Error::InvalidReference(object)),
        }
    }

    /// Write a field of an instance
    pub fn set_field(&mut self, object: ObjectRef, slot: usize, value: Value) -> Result<(), Error> {
        match self.objects.get_mut(object.0) {
            Some(HeapObject::Instance { fields, .. }) => match fields.get_mut(slot) {
                Some(field) => {
                    *field = value;
                    Ok(())
                }
                None => Err(Error::InvalidField { object, slot }),
            },
            Some(HeapObject::CharArray(_)) | None => Err(Error::InvalidReference(object)),
        }
    }
}

impl<'g> ObjectModel<'g> for Heap<'g> {
    fn runtime_class(&self, object: ObjectRef) -> Option<ClassId<'g>> {
        match self.objects.get(object.0)? {
            HeapObject::Instance { class, .. } => Some(*class),
            HeapObject::CharArray(_) => None,
        }
    }

    fn reference_field(&self, object: ObjectRef, slot: usize) -> Option<ObjectRef> {
        match self.objects.get(object.0)? {
            HeapObject::Instance { fields, .. } => fields.get(slot)?.reference(),
            HeapObject::CharArray(_) => None,
        }
    }

    fn char_array(&self, object: ObjectRef) -> Option<&[u16]> {
        match self.objects.get(object.0)? {
            HeapObject::CharArray(chars) => Some(chars.as_slice()),
            HeapObject::Instance { .. } => None,
        }
    }
}
