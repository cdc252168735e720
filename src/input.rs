use std::io::{ErrorKind, Read};

use log::trace;

use crate::{
    backfill::BackfillReader,
    error::{CodecError, Result},
};

/// The decoder's "consumed so far" cursor.
///
/// An in-memory buffer moves an offset; a stream goes through a
/// [`BackfillReader`] and returns whatever a hook left unused.
pub(crate) trait Input {
    /// Fills `dst` completely or fails with the byte deficit.
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Unread bytes offered to a decode hook, at most `limit` of them on a
    /// stream. Must be followed by [`Input::advance`].
    fn lookahead(&mut self, limit: usize) -> Result<&[u8]>;

    /// Consumes `used` bytes of the last lookahead and releases the rest.
    fn advance(&mut self, used: usize);

    fn consumed(&self) -> usize;
}

pub(crate) struct SliceInput<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceInput<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl Input for SliceInput<'_> {
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let remaining = &self.buf[self.pos..];
        if remaining.len() < dst.len() {
            return Err(CodecError::Shortage {
                needed: dst.len() - remaining.len(),
            });
        }
        dst.copy_from_slice(&remaining[..dst.len()]);
        self.pos += dst.len();
        Ok(())
    }

    fn lookahead(&mut self, _limit: usize) -> Result<&[u8]> {
        Ok(&self.buf[self.pos..])
    }

    fn advance(&mut self, used: usize) {
        self.pos += used;
    }

    fn consumed(&self) -> usize {
        self.pos
    }
}

pub(crate) struct StreamInput<R> {
    reader: BackfillReader<R>,
    chunk: Vec<u8>,
    filled: usize,
    consumed: usize,
}

impl<R: Read> StreamInput<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader: BackfillReader::new(reader),
            chunk: Vec::new(),
            filled: 0,
            consumed: 0,
        }
    }
}

impl<R: Read> Input for StreamInput<R> {
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let mut got = 0;
        while got < dst.len() {
            match self.reader.read(&mut dst[got..]) {
                Ok(0) => {
                    return Err(CodecError::Shortage {
                        needed: dst.len() - got,
                    })
                }
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.consumed += got;
        Ok(())
    }

    /// One read of at most `limit` bytes, served from backfilled bytes when
    /// there are any.
    fn lookahead(&mut self, limit: usize) -> Result<&[u8]> {
        if self.chunk.len() < limit {
            self.chunk.resize(limit, 0);
        }
        self.filled = loop {
            match self.reader.read(&mut self.chunk[..limit]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        Ok(&self.chunk[..self.filled])
    }

    fn advance(&mut self, used: usize) {
        let unused = &self.chunk[used..self.filled];
        if !unused.is_empty() {
            trace!("backfilling {} unused byte(s)", unused.len());
            self.reader.backfill(unused);
        }
        self.consumed += used;
        self.filled = 0;
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_shortage_names_deficit() {
        let mut input = SliceInput::new(&[0, 0, 0]);
        let mut dst = [0u8; 4];
        let err = input.read_exact(&mut dst).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 1 }));
        assert_eq!(input.consumed(), 0);
    }

    #[test]
    fn test_stream_shortage_names_deficit() {
        let mut input = StreamInput::new(&[1u8, 2][..]);
        let mut dst = [0u8; 8];
        let err = input.read_exact(&mut dst).unwrap_err();
        assert!(matches!(err, CodecError::Shortage { needed: 6 }));
    }

    #[test]
    fn test_stream_lookahead_returns_unused_suffix() {
        let mut input = StreamInput::new(&[1u8, 2, 3, 4, 5][..]);
        assert_eq!(input.lookahead(16).unwrap(), &[1, 2, 3, 4, 5]);
        input.advance(2);

        let mut dst = [0u8; 3];
        input.read_exact(&mut dst).unwrap();
        assert_eq!(dst, [3, 4, 5]);
        assert_eq!(input.consumed(), 5);
    }

    #[test]
    fn test_stream_lookahead_is_bounded() {
        let mut input = StreamInput::new(&[1u8, 2, 3, 4, 5][..]);
        assert_eq!(input.lookahead(2).unwrap(), &[1, 2]);
        input.advance(1);
        assert_eq!(input.lookahead(2).unwrap(), &[2]);
        input.advance(1);
        assert_eq!(input.lookahead(8).unwrap(), &[3, 4, 5]);
    }

    #[test]
    fn test_slice_lookahead_offers_everything() {
        let mut input = SliceInput::new(&[1, 2, 3]);
        input.advance(1);
        assert_eq!(input.lookahead(1).unwrap(), &[2, 3]);
        input.advance(2);
        assert!(input.lookahead(1).unwrap().is_empty());
        assert_eq!(input.consumed(), 3);
    }
}
