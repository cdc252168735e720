//! Length-prefixed byte blocks and strings.
//!
//! ```text
//! +----------------+--------+--------+     +--------+
//! | length (1..8B) | byte-0 | byte-1 | ... | byte-n |
//! +----------------+--------+--------+     +--------+
//! ```
//!
//! The length uses the byte order of the call. These are ordinary custom
//! codecs; the engine treats them like any other hook implementer.

use crate::{
    error::{CodecError, Result},
    order::Endian,
    primitive::{Primitive, PrimitiveMut},
    wire::{Marshal, Unmarshal, View, ViewMut, Wire},
};

trait Payload: Sized {
    fn as_wire(&self) -> &[u8];
    fn from_wire(bytes: &[u8]) -> Result<Self>;
}

impl Payload for Vec<u8> {
    fn as_wire(&self) -> &[u8] {
        self
    }

    fn from_wire(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl Payload for String {
    fn as_wire(&self) -> &[u8] {
        self.as_bytes()
    }

    fn from_wire(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec()).map_err(CodecError::hook)
    }
}

macro_rules! impl_length_prefixed {
    ($(#[$meta:meta])* $name:ident($inner:ty), $len:ty => $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub $inner);

        impl $name {
            const PREFIX: usize = core::mem::size_of::<$len>();

            pub fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl Marshal for $name {
            fn marshal(&self, order: Endian) -> Result<Vec<u8>> {
                let payload = self.0.as_wire();
                let len = <$len>::try_from(payload.len()).map_err(|_| {
                    CodecError::custom(format!(
                        "{} holds at most {} bytes, got {}",
                        stringify!($name),
                        <$len>::MAX,
                        payload.len()
                    ))
                })?;

                let mut out = vec![0u8; Self::PREFIX + payload.len()];
                order.write(Primitive::$variant(len), &mut out[..Self::PREFIX]);
                out[Self::PREFIX..].copy_from_slice(payload);
                Ok(out)
            }
        }

        impl Unmarshal for $name {
            fn unmarshal(&mut self, order: Endian, data: &[u8]) -> Result<usize> {
                if data.len() < Self::PREFIX {
                    return Err(CodecError::Shortage {
                        needed: Self::PREFIX - data.len(),
                    });
                }

                let mut len: $len = 0;
                order.read(PrimitiveMut::$variant(&mut len), &data[..Self::PREFIX]);
                let end = usize::try_from(len)
                    .ok()
                    .and_then(|len| len.checked_add(Self::PREFIX))
                    .ok_or_else(|| {
                        CodecError::custom(format!(
                            "{} length {} does not fit in memory",
                            stringify!($name),
                            len
                        ))
                    })?;
                if data.len() < end {
                    return Err(CodecError::Shortage {
                        needed: end - data.len(),
                    });
                }

                self.0 = <$inner>::from_wire(&data[Self::PREFIX..end])?;
                Ok(end)
            }
        }

        impl Wire for $name {
            fn view(&self, _order: Endian) -> View<'_> {
                View::Custom(self)
            }

            fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
                ViewMut::Custom(self)
            }
        }
    };
}

impl_length_prefixed!(
    /// Byte block of at most 255 bytes behind a one-byte length.
    Bytes8(Vec<u8>), u8 => U8
);
impl_length_prefixed!(
    /// Byte block behind a two-byte length.
    Bytes16(Vec<u8>), u16 => U16
);
impl_length_prefixed!(
    /// Byte block behind a four-byte length.
    Bytes32(Vec<u8>), u32 => U32
);
impl_length_prefixed!(
    /// Byte block behind an eight-byte length.
    Bytes64(Vec<u8>), u64 => U64
);
impl_length_prefixed!(
    /// UTF-8 string of at most 255 bytes behind a one-byte length.
    String8(String), u8 => U8
);
impl_length_prefixed!(String16(String), u16 => U16);
impl_length_prefixed!(String32(String), u32 => U32);
impl_length_prefixed!(String64(String), u64 => U64);

impl From<&str> for String8 {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_one_byte_prefix_ignores_order() {
        let value = Bytes8(b"abc".to_vec());
        assert_eq!(value.marshal(Endian::Big).unwrap(), hex!("03616263"));
        assert_eq!(value.marshal(Endian::Little).unwrap(), hex!("03616263"));

        let value = String8::from("abc");
        assert_eq!(value.marshal(Endian::Little).unwrap(), hex!("03616263"));
    }

    #[test]
    fn test_wide_prefix_follows_order() {
        let value = Bytes16(vec![0xaa, 0xbb]);
        assert_eq!(value.marshal(Endian::Big).unwrap(), hex!("0002aabb"));
        assert_eq!(value.marshal(Endian::Little).unwrap(), hex!("0200aabb"));

        let value = String32("hi".to_string());
        assert_eq!(value.marshal(Endian::Big).unwrap(), hex!("000000026869"));
        assert_eq!(value.marshal(Endian::Little).unwrap(), hex!("020000006869"));
    }

    #[test]
    fn test_unmarshal_reports_used_bytes() {
        let mut value = Bytes8::default();
        let used = value.unmarshal(Endian::Big, &hex!("0477787a7aff")).unwrap();
        assert_eq!(used, 5);
        assert_eq!(value.0, b"wxzz".to_vec());

        let mut value = String64::default();
        let data = hex!("0300000000000000616263ffff");
        assert_eq!(value.unmarshal(Endian::Little, &data).unwrap(), 11);
        assert_eq!(value.0, "abc");
    }

    #[test]
    fn test_unmarshal_shortage() {
        let mut value = Bytes8::default();
        let err = value.unmarshal(Endian::Big, &[3]).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 3 }));

        let err = value.unmarshal(Endian::Big, &[]).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 1 }));

        let mut value = String16::default();
        let err = value.unmarshal(Endian::Big, &[0]).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 1 }));
        let err = value.unmarshal(Endian::Big, &hex!("000561")).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 4 }));
    }

    #[test]
    fn test_invalid_utf8_is_hook_error() {
        let mut value = String8::default();
        let err = value.unmarshal(Endian::Big, &hex!("01ff")).unwrap_err();
        assert!(matches!(err, CodecError::Hook(_)));
    }

    #[test]
    fn test_oversized_payload() {
        let value = Bytes8(vec![0; 256]);
        assert!(matches!(
            value.marshal(Endian::Big).unwrap_err(),
            CodecError::Hook(_)
        ));
    }
}
