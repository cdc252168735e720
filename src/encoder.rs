use std::{cell::RefCell, io::Write};

use bytes::{BufMut, BytesMut};
use log::trace;

use crate::{
    config::Config,
    error::{CodecError, Result},
    order::Endian,
    ordinal,
    primitive::MAX_PRIMITIVE_SIZE,
    wire::{View, Wire},
};

/// Destination of encoded bytes.
pub(crate) trait Sink {
    fn put(&mut self, bytes: &[u8]) -> Result<()>;
}

impl Sink for BytesMut {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_slice(bytes);
        Ok(())
    }
}

/// Adapts any `io::Write` so output streams out as it is produced.
pub(crate) struct WriteSink<'w, W: ?Sized>(pub(crate) &'w mut W);

impl<W: Write + ?Sized> Sink for WriteSink<'_, W> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.0.write_all(bytes)?;
        Ok(())
    }
}

/// Owns the default targets materialised for absent references during one
/// run. Entries are only freed when the arena drops.
struct Arena {
    slots: RefCell<Vec<*mut dyn Wire>>,
}

impl Arena {
    fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
        }
    }

    fn alloc(&self, value: Box<dyn Wire>) -> &dyn Wire {
        let ptr = Box::into_raw(value);
        self.slots.borrow_mut().push(ptr);
        // SAFETY: `ptr` comes from `Box::into_raw` and is freed only in
        // `Drop`, which cannot run while `self` is borrowed.
        unsafe { &*ptr }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for ptr in self.slots.get_mut().drain(..) {
            // SAFETY: every pointer was produced by `Box::into_raw` in
            // `alloc` and is released exactly once.
            drop(unsafe { Box::from_raw(ptr) });
        }
    }
}

/// Encode side of the traversal engine.
pub(crate) struct Encoder<'s, S: ?Sized> {
    sink: &'s mut S,
    order: Endian,
    config: Config,
    written: usize,
}

impl<'s, S: Sink + ?Sized> Encoder<'s, S> {
    pub(crate) fn new(sink: &'s mut S, order: Endian, config: Config) -> Self {
        Self {
            sink,
            order,
            config,
            written: 0,
        }
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }

    /// Walks `root` with an explicit work stack, writing in wire order.
    ///
    /// Each entry carries how many absent references were materialised on
    /// its path; defaults live in the run's arena until the walk ends.
    pub(crate) fn run(&mut self, root: &dyn Wire) -> Result<()> {
        let arena = Arena::new();
        let mut stack: Vec<(&dyn Wire, usize)> = vec![(root, 0)];

        while let Some((cur, depth)) = stack.pop() {
            let view = cur.view(self.order);
            trace!("encode {} as {}", cur.type_name(), view.kind());

            match view {
                View::Custom(hook) => {
                    let data = hook.marshal(self.order)?;
                    self.emit(&data)?;
                }
                View::Reference(target) => stack.push((target, depth)),
                View::Vacant(target) => {
                    let limit = self.config.max_vacant_depth();
                    if depth >= limit {
                        return Err(CodecError::DepthExceeded { limit });
                    }
                    stack.push((arena.alloc(target), depth + 1));
                }
                View::Fields(fields) => {
                    let order = ordinal::resolve(fields.iter().map(|f| (f.name, f.tag)))
                        .map_err(|source| CodecError::Ordinal {
                            container: cur.type_name(),
                            source,
                        })?;
                    for &position in order.iter().rev() {
                        let field = &fields[position];
                        let value = field.value.ok_or_else(|| {
                            CodecError::Invalid(format!(
                                "field `{}` of `{}` participates but has no value",
                                field.name,
                                cur.type_name()
                            ))
                        })?;
                        stack.push((value, depth));
                    }
                }
                View::Sequence(items) => stack.extend(items.rev().map(|item| (item, depth))),
                View::Primitive(value) => {
                    let mut buf = [0u8; MAX_PRIMITIVE_SIZE];
                    let size = value.size();
                    self.order.write(value, &mut buf[..size]);
                    self.emit(&buf[..size])?;
                }
                View::Text(bytes) => self.emit(bytes)?,
                View::Unsupported(reason) => {
                    return Err(CodecError::unsupported(cur.type_name(), reason));
                }
            }
        }

        Ok(())
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.put(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_keeps_earlier_entries_alive() {
        let arena = Arena::new();
        let first = arena.alloc(Box::new(7u16));
        for i in 0..64u32 {
            arena.alloc(Box::new(i));
        }
        assert!(matches!(
            first.view(Endian::Big),
            View::Primitive(crate::primitive::Primitive::U16(7))
        ));
        assert_eq!(arena.slots.borrow().len(), 65);
    }
}
