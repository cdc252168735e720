use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::primitive::{Complex, Primitive, PrimitiveMut};

/// Byte order selected once per call and threaded through every primitive
/// and every custom hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    pub fn is_big_endian(self) -> bool {
        self == Endian::Big
    }

    /// Writes `value` into the first `value.size()` bytes of `dst`.
    ///
    /// Panics if `dst` is shorter than the value; callers size the slice from
    /// [`Primitive::size`].
    pub fn write(self, value: Primitive, dst: &mut [u8]) {
        match self {
            Endian::Big => write_with::<BigEndian>(value, dst),
            Endian::Little => write_with::<LittleEndian>(value, dst),
        }
    }

    /// Reads `target.size()` bytes from `src` into the referenced value.
    pub fn read(self, target: PrimitiveMut<'_>, src: &[u8]) {
        match self {
            Endian::Big => read_with::<BigEndian>(target, src),
            Endian::Little => read_with::<LittleEndian>(target, src),
        }
    }
}

/// Maps the `byteorder` marker types onto [`Endian`], so the public API can
/// take the byte order as a type parameter.
pub trait ByteOrderExt: ByteOrder {
    const ENDIAN: Endian;
}

impl ByteOrderExt for BigEndian {
    const ENDIAN: Endian = Endian::Big;
}

impl ByteOrderExt for LittleEndian {
    const ENDIAN: Endian = Endian::Little;
}

fn write_with<B: ByteOrder>(value: Primitive, dst: &mut [u8]) {
    match value {
        Primitive::Bool(v) => dst[0] = v as u8,
        Primitive::U8(v) => dst[0] = v,
        Primitive::I8(v) => dst[0] = v as u8,
        Primitive::U16(v) => B::write_u16(dst, v),
        Primitive::I16(v) => B::write_i16(dst, v),
        Primitive::U32(v) => B::write_u32(dst, v),
        Primitive::I32(v) => B::write_i32(dst, v),
        Primitive::U64(v) => B::write_u64(dst, v),
        Primitive::I64(v) => B::write_i64(dst, v),
        Primitive::F32(v) => B::write_u32(dst, v.to_bits()),
        Primitive::F64(v) => B::write_u64(dst, v.to_bits()),
        Primitive::Complex32(v) => {
            B::write_u32(&mut dst[..4], v.re.to_bits());
            B::write_u32(&mut dst[4..8], v.im.to_bits());
        }
        Primitive::Complex64(v) => {
            B::write_u64(&mut dst[..8], v.re.to_bits());
            B::write_u64(&mut dst[8..16], v.im.to_bits());
        }
    }
}

fn read_with<B: ByteOrder>(target: PrimitiveMut<'_>, src: &[u8]) {
    match target {
        PrimitiveMut::Bool(v) => *v = src[0] != 0,
        PrimitiveMut::U8(v) => *v = src[0],
        PrimitiveMut::I8(v) => *v = src[0] as i8,
        PrimitiveMut::U16(v) => *v = B::read_u16(src),
        PrimitiveMut::I16(v) => *v = B::read_i16(src),
        PrimitiveMut::U32(v) => *v = B::read_u32(src),
        PrimitiveMut::I32(v) => *v = B::read_i32(src),
        PrimitiveMut::U64(v) => *v = B::read_u64(src),
        PrimitiveMut::I64(v) => *v = B::read_i64(src),
        PrimitiveMut::F32(v) => *v = f32::from_bits(B::read_u32(src)),
        PrimitiveMut::F64(v) => *v = f64::from_bits(B::read_u64(src)),
        PrimitiveMut::Complex32(v) => {
            *v = Complex::new(
                f32::from_bits(B::read_u32(&src[..4])),
                f32::from_bits(B::read_u32(&src[4..8])),
            )
        }
        PrimitiveMut::Complex64(v) => {
            *v = Complex::new(
                f64::from_bits(B::read_u64(&src[..8])),
                f64::from_bits(B::read_u64(&src[8..16])),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(order: Endian, value: Primitive) -> Vec<u8> {
        let mut buf = vec![0u8; value.size()];
        order.write(value, &mut buf);
        buf
    }

    #[test]
    fn test_int16_byte_order() {
        assert_eq!(written(Endian::Big, Primitive::I16(255)), vec![0, 255]);
        assert_eq!(written(Endian::Little, Primitive::I16(255)), vec![255, 0]);
    }

    #[test]
    fn test_single_byte_ignores_order() {
        assert_eq!(written(Endian::Big, Primitive::I8(-2)), vec![0xfe]);
        assert_eq!(written(Endian::Little, Primitive::I8(-2)), vec![0xfe]);
        assert_eq!(written(Endian::Big, Primitive::Bool(true)), vec![1]);
        assert_eq!(written(Endian::Little, Primitive::Bool(false)), vec![0]);
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        let mut value = false;
        Endian::Big.read(PrimitiveMut::Bool(&mut value), &[7]);
        assert!(value);
    }

    #[test]
    fn test_float_bits() {
        assert_eq!(written(Endian::Big, Primitive::F32(64.0)), vec![66, 128, 0, 0]);
        assert_eq!(
            written(Endian::Big, Primitive::F64(64.0)),
            vec![64, 80, 0, 0, 0, 0, 0, 0]
        );

        let mut value = 0f64;
        Endian::Little.read(PrimitiveMut::F64(&mut value), &[0, 0, 0, 0, 0, 0, 80, 64]);
        assert_eq!(value, 64.0);
    }

    #[test]
    fn test_complex_real_part_first() {
        let value = Complex::new(32f32, -1f32);
        assert_eq!(
            written(Endian::Big, Primitive::Complex32(value)),
            vec![66, 0, 0, 0, 191, 128, 0, 0]
        );

        let mut decoded = Complex::default();
        Endian::Big.read(
            PrimitiveMut::Complex32(&mut decoded),
            &[66, 0, 0, 0, 191, 128, 0, 0],
        );
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_u64_little_endian() {
        assert_eq!(
            written(Endian::Little, Primitive::U64(0x0102030405060708)),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
    }
}
