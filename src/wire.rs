use crate::{error::Result, order::Endian, primitive::Primitive, primitive::PrimitiveMut};

/// A value the traversal engines know how to walk.
///
/// The engines never recurse into a value directly: every time a value is
/// popped off the work stack they ask it for a fresh classification, either
/// a read-only [`View`] when encoding or a writable [`ViewMut`] when decoding.
/// Children reported by the view are pushed back onto the stack.
///
/// Structs usually get this through `#[derive(Wire)]`.
pub trait Wire {
    fn view(&self, order: Endian) -> View<'_>;

    fn view_mut(&mut self, order: Endian) -> ViewMut<'_>;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Encode hook: the value owns its wire representation.
pub trait Marshal {
    fn marshal(&self, order: Endian) -> Result<Vec<u8>>;
}

/// Decode hook. `data` holds at least the bytes currently available; the
/// hook reports how many leading bytes it consumed. A shortfall must be
/// returned as an error, never read past `data`.
pub trait Unmarshal {
    fn unmarshal(&mut self, order: Endian, data: &[u8]) -> Result<usize>;
}

/// Storage behind an Optional-Reference that may be vacant.
pub trait Slot {
    fn is_vacant(&self) -> bool;

    /// Replaces a vacant reference with a freshly owned default value.
    fn fill_default(&mut self);

    fn target_mut(&mut self) -> Option<&mut dyn Wire>;
}

/// One field of a Fixed-Field-Container as seen by the encoder.
pub struct Field<'a> {
    pub name: &'static str,
    pub tag: Option<&'static str>,
    pub value: Option<&'a dyn Wire>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, tag: Option<&'static str>, value: &'a dyn Wire) -> Self {
        Self {
            name,
            tag,
            value: Some(value),
        }
    }

    /// A field tagged `"-"`; it never reaches the wire.
    pub fn excluded(name: &'static str) -> Self {
        Self {
            name,
            tag: Some(crate::ordinal::EXCLUDED),
            value: None,
        }
    }
}

/// One field of a Fixed-Field-Container as seen by the decoder.
pub struct FieldMut<'a> {
    pub name: &'static str,
    pub tag: Option<&'static str>,
    pub value: Option<&'a mut dyn Wire>,
}

impl<'a> FieldMut<'a> {
    pub fn new(name: &'static str, tag: Option<&'static str>, value: &'a mut dyn Wire) -> Self {
        Self {
            name,
            tag,
            value: Some(value),
        }
    }

    pub fn excluded(name: &'static str) -> Self {
        Self {
            name,
            tag: Some(crate::ordinal::EXCLUDED),
            value: None,
        }
    }
}

pub type Elements<'a> = Box<dyn DoubleEndedIterator<Item = &'a dyn Wire> + 'a>;
pub type ElementsMut<'a> = Box<dyn DoubleEndedIterator<Item = &'a mut dyn Wire> + 'a>;

/// Shape of a value on the encode path.
pub enum View<'a> {
    Custom(&'a dyn Marshal),
    /// A present Optional-Reference, already dereferenced.
    Reference(&'a dyn Wire),
    /// An absent Optional-Reference, replaced by a fresh default target.
    /// The engine keeps it alive for the rest of the walk.
    Vacant(Box<dyn Wire>),
    Fields(Vec<Field<'a>>),
    Sequence(Elements<'a>),
    Primitive(Primitive),
    Text(&'a [u8]),
    Unsupported(&'static str),
}

impl View<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            View::Custom(_) => "custom",
            View::Reference(_) => "reference",
            View::Vacant(_) => "vacant reference",
            View::Fields(_) => "fields",
            View::Sequence(_) => "sequence",
            View::Primitive(_) => "primitive",
            View::Text(_) => "text",
            View::Unsupported(_) => "unsupported",
        }
    }
}

/// Shape of a value on the decode path.
pub enum ViewMut<'a> {
    Custom(&'a mut dyn Unmarshal),
    Reference(&'a mut dyn Slot),
    Fields(Vec<FieldMut<'a>>),
    Sequence(ElementsMut<'a>),
    Primitive(PrimitiveMut<'a>),
    Unsupported(&'static str),
}

impl ViewMut<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            ViewMut::Custom(_) => "custom",
            ViewMut::Reference(_) => "reference",
            ViewMut::Fields(_) => "fields",
            ViewMut::Sequence(_) => "sequence",
            ViewMut::Primitive(_) => "primitive",
            ViewMut::Unsupported(_) => "unsupported",
        }
    }
}
