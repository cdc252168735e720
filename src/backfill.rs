use std::{
    collections::VecDeque,
    io::{self, Read},
};

/// A reader that can take back bytes it already handed out.
///
/// Reads drain previously backfilled bytes first, front to back, and only
/// touch the underlying reader once none are pending. A read served from
/// backfilled bytes may return fewer bytes than requested.
pub struct BackfillReader<R> {
    pending: VecDeque<u8>,
    inner: R,
}

impl<R: Read> BackfillReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            pending: VecDeque::new(),
            inner,
        }
    }

    /// Puts `bytes` in front of everything not yet read.
    pub fn backfill(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().rev() {
            self.pending.push_front(byte);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for BackfillReader<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        if !self.pending.is_empty() {
            let n = dst.len().min(self.pending.len());
            for (slot, byte) in dst.iter_mut().zip(self.pending.drain(..n)) {
                *slot = byte;
            }
            return Ok(n);
        }
        self.inner.read(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_source_without_backfill() {
        let mut reader = BackfillReader::new(&[1u8, 2, 3][..]);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_backfill_is_read_first() {
        let mut reader = BackfillReader::new(&[9u8, 9][..]);
        reader.backfill(&[1, 2, 3]);

        let mut buf = [0u8; 2];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);

        // partial fill from the remaining backfill only
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 3);

        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[9, 9]);
    }

    #[test]
    fn test_backfill_prepends() {
        let mut reader = BackfillReader::new(io::empty());
        reader.backfill(&[3, 4]);
        reader.backfill(&[1, 2]);
        assert_eq!(reader.pending(), 4);

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4]);
    }
}
