use core::any::{Any, TypeId};
use core::fmt;

/// Static metadata describing a type that can be remapped.
///
/// Every [`crate::Remap`] implementor exposes exactly one `Shape` through
/// [`crate::Remap::SHAPE`]. Shapes only describe; turning them into something
/// the mapper can dispatch on is the job of [`crate::DescriptorCache`].
#[derive(Clone, Copy)]
pub struct Shape {
    /// Returns the [`TypeId`] of the described type.
    ///
    /// Kept behind a function pointer because `TypeId::of` is not usable in
    /// const context.
    pub id: fn() -> TypeId,

    /// Human-readable name of the type, e.g. `"u32"` or `"Employee"`.
    pub type_identifier: &'static str,

    /// What kind of type this is, plus the operations needed to fill it.
    pub def: Def,
}

impl Shape {
    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn id(&self) -> TypeId {
        (self.id)()
    }

    /// Returns true if this shape describes `T`.
    #[inline]
    pub fn is_type<T: Any>(&self) -> bool {
        self.id() == TypeId::of::<T>()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_identifier", &self.type_identifier)
            .field("def", &self.def)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}

/// The definition of a shape: which family of types it belongs to.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A struct with named fields.
    Struct(StructDef),
    /// A growable list such as `Vec<T>`.
    List(ListDef),
    /// A nullable value such as `Option<T>`.
    Option(OptionDef),
    /// A numeric, string or boolean leaf.
    Scalar(ScalarDef),
    /// A type that holds an untyped value verbatim.
    Dynamic,
    /// A type that can only be recognized by identity.
    Opaque,
}

/// Fields of a struct, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// The fields that take part in remapping.
    pub fields: &'static [Field],
}

/// Borrows a field out of a type-erased struct.
///
/// Returns `None` when the argument is not the struct the field belongs to.
pub type FieldGetFn = for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>;

/// Mutably borrows a field out of a type-erased struct.
///
/// Returns `None` when the argument is not the struct the field belongs to.
pub type FieldGetMutFn = for<'a> fn(&'a mut dyn Any) -> Option<&'a mut dyn Any>;

/// Describes one field of a struct.
#[derive(Clone, Copy)]
pub struct Field {
    /// The field's identifier in Rust source.
    pub name: &'static str,

    /// The serialization tag, if the field has one.
    ///
    /// The tag may carry options after a comma (`"payload,omitempty"`); only
    /// the part before the first comma is a lookup key.
    pub rename: Option<&'static str>,

    /// Shape of the field's type.
    ///
    /// The indirection lets shapes refer to each other without const cycles.
    pub shape: fn() -> &'static Shape,

    /// Shared accessor.
    pub get: FieldGetFn,

    /// Exclusive accessor.
    pub get_mut: FieldGetMutFn,
}

impl Field {
    /// Returns the shape of the field's type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rename", &self.rename)
            .field("shape", &self.shape().type_identifier)
            .finish()
    }
}

/// Allocates a fresh, default-valued element or pointee.
pub type NewItemFn = fn() -> Box<dyn Any>;

/// Moves a boxed item into a type-erased container.
///
/// Gives the item back if either argument has the wrong type.
pub type AttachFn = fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Number of items in a type-erased list, or `None` on a type mismatch.
pub type ListLenFn = fn(&dyn Any) -> Option<usize>;

/// Borrows the n-th item of a type-erased list.
pub type ListGetFn = for<'a> fn(&'a dyn Any, usize) -> Option<&'a dyn Any>;

/// Operations on a list type.
#[derive(Clone, Copy)]
pub struct ListDef {
    /// Shape of the list's items.
    pub item: fn() -> &'static Shape,
    /// Allocates a default item.
    pub new_item: NewItemFn,
    /// Appends an item allocated by `new_item`.
    pub push: AttachFn,
    /// Returns the list's length.
    pub len: ListLenFn,
    /// Borrows an item.
    pub get: ListGetFn,
}

impl ListDef {
    /// Returns the shape of the list's items.
    #[inline]
    pub fn item(&self) -> &'static Shape {
        (self.item)()
    }
}

impl fmt::Debug for ListDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDef")
            .field("item", &self.item().type_identifier)
            .finish_non_exhaustive()
    }
}

/// Borrows the value inside a type-erased option, `None` if unset.
pub type OptionGetFn = for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>;

/// Operations on a nullable type.
#[derive(Clone, Copy)]
pub struct OptionDef {
    /// Shape of the pointee.
    pub inner: fn() -> &'static Shape,
    /// Allocates a default pointee.
    pub new_inner: NewItemFn,
    /// Stores a pointee allocated by `new_inner`, making the option `Some`.
    pub attach: AttachFn,
    /// Borrows the pointee.
    pub get: OptionGetFn,
}

impl OptionDef {
    /// Returns the shape of the pointee.
    #[inline]
    pub fn inner(&self) -> &'static Shape {
        (self.inner)()
    }
}

impl fmt::Debug for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("inner", &self.inner().type_identifier)
            .finish_non_exhaustive()
    }
}

/// Leaf types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarDef {
    /// An integer or floating point number.
    Numeric(NumericType),
    /// An owned string.
    String,
    /// A boolean.
    Bool,
}

/// The concrete numeric type behind a [`ScalarDef::Numeric`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    ISize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    USize,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl NumericType {
    /// Returns true for `f32` and `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, NumericType::F32 | NumericType::F64)
    }

    /// Returns true for the signed integer types.
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            NumericType::I8
                | NumericType::I16
                | NumericType::I32
                | NumericType::I64
                | NumericType::ISize
        )
    }
}
