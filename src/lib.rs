//! Binary encoding of nested values with an explicit byte order.
//!
//! Values are walked with an explicit work stack. Each value classifies
//! itself through [`Wire`] every time it is visited: a custom hook, an
//! optional reference, a container of fields, a sequence, a fixed-width
//! primitive or raw text. Containers may reorder or drop their fields on the
//! wire with ordinal tags:
//!
//! ```
//! use wirebin::{BigEndian, Wire};
//!
//! #[derive(Wire, Default)]
//! struct Request {
//!     #[wire(ordinal = 1)]
//!     ver: u8,
//!     #[wire(ordinal = 0)]
//!     port: u16,
//!     #[wire(ordinal = "-")]
//!     memo: String,
//! }
//!
//! let req = Request { ver: 5, port: 1080, memo: "not on the wire".into() };
//! let bytes = wirebin::encode::<BigEndian>(&req).unwrap();
//! assert_eq!(&bytes[..], &[4, 56, 5]);
//!
//! let mut decoded = Request::default();
//! wirebin::decode::<BigEndian>(&bytes, &mut decoded).unwrap();
//! assert_eq!((decoded.ver, decoded.port), (5, 1080));
//! ```

extern crate self as wirebin;

mod backfill;
mod config;
mod decoder;
mod encoder;
mod error;
mod input;
mod map;
mod order;
pub mod ordinal;
mod prefixed;
mod primitive;
mod reference;
mod text;
mod tuple;
mod vec;
mod wire;

use std::io::{Read, Write};

use ::bytes::{Bytes, BytesMut};
use log::debug;

pub use backfill::BackfillReader;
pub use byteorder::{BigEndian, LittleEndian};
pub use config::{Config, DEFAULT_LOOKAHEAD, DEFAULT_MAX_VACANT_DEPTH};
pub use error::{CodecError, OrdinalError, Result};
pub use order::{ByteOrderExt, Endian};
pub use prefixed::{Bytes16, Bytes32, Bytes64, Bytes8, String16, String32, String64, String8};
pub use primitive::{Complex, Complex32, Complex64, Primitive, PrimitiveMut};
pub use wire::{
    Elements, ElementsMut, Field, FieldMut, Marshal, Slot, Unmarshal, View, ViewMut, Wire,
};

#[cfg(feature = "derive")]
pub use wirebin_derive::Wire;

use decoder::Decoder;
use encoder::{Encoder, WriteSink};
use input::{SliceInput, StreamInput};

/// Byte order and limits for one or more encode/decode calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    endian: Endian,
    config: Config,
}

impl Codec {
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            config: Config::default(),
        }
    }

    pub fn big_endian() -> Self {
        Self::new(Endian::Big)
    }

    pub fn little_endian() -> Self {
        Self::new(Endian::Little)
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes `value` into a fresh buffer. Nothing is returned on error.
    pub fn encode<T: Wire>(&self, value: &T) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        let mut encoder = Encoder::new(&mut buf, self.endian, self.config);
        encoder.run(value)?;
        debug!(
            "encoded {} as {} byte(s) {:?}",
            value.type_name(),
            encoder.written(),
            self.endian
        );
        Ok(buf.freeze())
    }

    /// Encodes `value` straight into `sink`. On error the sink keeps
    /// whatever was written before the failure.
    pub fn encode_to<W, T>(&self, sink: &mut W, value: &T) -> Result<()>
    where
        W: Write + ?Sized,
        T: Wire,
    {
        let mut sink = WriteSink(sink);
        let mut encoder = Encoder::new(&mut sink, self.endian, self.config);
        encoder.run(value)?;
        debug!(
            "streamed {} as {} byte(s) {:?}",
            value.type_name(),
            encoder.written(),
            self.endian
        );
        Ok(())
    }

    /// Populates `target` from the front of `input` and returns how many
    /// bytes were consumed. Trailing bytes are left alone.
    pub fn decode<T: Wire>(&self, input: &[u8], target: &mut T) -> Result<usize> {
        let type_name = target.type_name();
        let mut decoder = Decoder::new(SliceInput::new(input), self.endian, self.config);
        decoder.run(target)?;
        debug!(
            "decoded {} from {} of {} byte(s) {:?}",
            type_name,
            decoder.consumed(),
            input.len(),
            self.endian
        );
        Ok(decoder.consumed())
    }

    /// Populates `target` from a live stream. Custom hooks see at most
    /// [`Config::lookahead`] bytes at a time.
    pub fn decode_from<R, T>(&self, reader: R, target: &mut T) -> Result<()>
    where
        R: Read,
        T: Wire,
    {
        let type_name = target.type_name();
        let mut decoder = Decoder::new(StreamInput::new(reader), self.endian, self.config);
        decoder.run(target)?;
        debug!(
            "decoded {} from {} streamed byte(s) {:?}",
            type_name,
            decoder.consumed(),
            self.endian
        );
        Ok(())
    }
}

pub fn encode<B: ByteOrderExt>(value: &impl Wire) -> Result<Bytes> {
    Codec::new(B::ENDIAN).encode(value)
}

pub fn encode_to<B: ByteOrderExt>(
    sink: &mut (impl Write + ?Sized),
    value: &impl Wire,
) -> Result<()> {
    Codec::new(B::ENDIAN).encode_to(sink, value)
}

pub fn decode<B: ByteOrderExt>(input: &[u8], target: &mut impl Wire) -> Result<usize> {
    Codec::new(B::ENDIAN).decode(input, target)
}

pub fn decode_from<B: ByteOrderExt>(
    reader: impl Read,
    target: &mut impl Wire,
) -> Result<()> {
    Codec::new(B::ENDIAN).decode_from(reader, target)
}
