use crate::{
    order::Endian,
    wire::{View, ViewMut, Wire},
};

/// Complex number, real part first on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// A fixed-width value ready to be written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Complex32(Complex32),
    Complex64(Complex64),
}

/// A fixed-width slot waiting to be read into.
#[derive(Debug)]
pub enum PrimitiveMut<'a> {
    Bool(&'a mut bool),
    U8(&'a mut u8),
    I8(&'a mut i8),
    U16(&'a mut u16),
    I16(&'a mut i16),
    U32(&'a mut u32),
    I32(&'a mut i32),
    U64(&'a mut u64),
    I64(&'a mut i64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Complex32(&'a mut Complex32),
    Complex64(&'a mut Complex64),
}

/// Largest encoded primitive, a `Complex64`.
pub const MAX_PRIMITIVE_SIZE: usize = 16;

impl Primitive {
    pub fn size(&self) -> usize {
        match self {
            Primitive::Bool(_) | Primitive::U8(_) | Primitive::I8(_) => 1,
            Primitive::U16(_) | Primitive::I16(_) => 2,
            Primitive::U32(_) | Primitive::I32(_) | Primitive::F32(_) => 4,
            Primitive::U64(_) | Primitive::I64(_) | Primitive::F64(_) => 8,
            Primitive::Complex32(_) => 8,
            Primitive::Complex64(_) => 16,
        }
    }
}

impl PrimitiveMut<'_> {
    pub fn size(&self) -> usize {
        match self {
            PrimitiveMut::Bool(_) | PrimitiveMut::U8(_) | PrimitiveMut::I8(_) => 1,
            PrimitiveMut::U16(_) | PrimitiveMut::I16(_) => 2,
            PrimitiveMut::U32(_) | PrimitiveMut::I32(_) | PrimitiveMut::F32(_) => 4,
            PrimitiveMut::U64(_) | PrimitiveMut::I64(_) | PrimitiveMut::F64(_) => 8,
            PrimitiveMut::Complex32(_) => 8,
            PrimitiveMut::Complex64(_) => 16,
        }
    }
}

macro_rules! impl_wire_for_primitive {
    ($($typ:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Wire for $typ {
                #[inline]
                fn view(&self, _order: Endian) -> View<'_> {
                    View::Primitive(Primitive::$variant(*self))
                }

                #[inline]
                fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
                    ViewMut::Primitive(PrimitiveMut::$variant(self))
                }
            }
        )+
    };
}

impl_wire_for_primitive!(
    bool => Bool,
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex32,
    Complex64 => Complex64,
);

macro_rules! impl_wire_for_platform_int {
    ($($typ:ty),+) => {
        $(
            impl Wire for $typ {
                fn view(&self, _order: Endian) -> View<'_> {
                    View::Unsupported("platform-sized integers have no fixed wire width")
                }

                fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
                    ViewMut::Unsupported("platform-sized integers have no fixed wire width")
                }
            }
        )+
    };
}

impl_wire_for_platform_int!(usize, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_match_views() {
        let mut value = Complex64::new(1.0, 2.0);
        let size = match value.view(Endian::Big) {
            View::Primitive(p) => p.size(),
            _ => unreachable!(),
        };
        let size_mut = match value.view_mut(Endian::Big) {
            ViewMut::Primitive(p) => p.size(),
            _ => unreachable!(),
        };
        assert_eq!(size, MAX_PRIMITIVE_SIZE);
        assert_eq!(size, size_mut);
    }

    #[test]
    fn test_platform_ints_are_unsupported() {
        assert!(matches!(7usize.view(Endian::Big), View::Unsupported(_)));
        assert!(matches!((-7isize).view(Endian::Little), View::Unsupported(_)));
    }
}
