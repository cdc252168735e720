use log::trace;

use crate::{
    config::Config,
    error::{CodecError, Result},
    input::Input,
    order::Endian,
    ordinal,
    primitive::MAX_PRIMITIVE_SIZE,
    wire::{ViewMut, Wire},
};

/// Decode side of the traversal engine. Values are populated in place.
pub(crate) struct Decoder<I> {
    input: I,
    order: Endian,
    config: Config,
}

impl<I: Input> Decoder<I> {
    pub(crate) fn new(input: I, order: Endian, config: Config) -> Self {
        Self {
            input,
            order,
            config,
        }
    }

    pub(crate) fn consumed(&self) -> usize {
        self.input.consumed()
    }

    pub(crate) fn run(&mut self, root: &mut dyn Wire) -> Result<()> {
        // Each entry carries how many references were allocated on its path.
        let mut stack: Vec<(&mut dyn Wire, usize)> = vec![(root, 0)];

        while let Some((cur, depth)) = stack.pop() {
            let type_name = cur.type_name();
            let view = cur.view_mut(self.order);
            trace!("decode {} as {}", type_name, view.kind());

            match view {
                ViewMut::Custom(hook) => {
                    let data = self.input.lookahead(self.config.lookahead())?;
                    let available = data.len();
                    let used = hook.unmarshal(self.order, data)?;
                    if used > available {
                        return Err(CodecError::Invalid(format!(
                            "`{type_name}` consumed {used} byte(s) but only {available} were offered"
                        )));
                    }
                    self.input.advance(used);
                }
                ViewMut::Reference(slot) => {
                    let mut depth = depth;
                    if slot.is_vacant() {
                        let limit = self.config.max_vacant_depth();
                        if depth >= limit {
                            return Err(CodecError::DepthExceeded { limit });
                        }
                        trace!("allocating target for vacant `{type_name}`");
                        slot.fill_default();
                        depth += 1;
                    }
                    let target = slot.target_mut().ok_or_else(|| {
                        CodecError::Invalid(format!("`{type_name}` is still vacant after allocation"))
                    })?;
                    stack.push((target, depth));
                }
                ViewMut::Fields(fields) => {
                    let order = ordinal::resolve(fields.iter().map(|f| (f.name, f.tag)))
                        .map_err(|source| CodecError::Ordinal {
                            container: type_name,
                            source,
                        })?;
                    let mut values: Vec<_> = fields.into_iter().map(|f| (f.name, f.value)).collect();
                    for &position in order.iter().rev() {
                        let (name, value) = &mut values[position];
                        let value = value.take().ok_or_else(|| {
                            CodecError::Invalid(format!(
                                "field `{name}` of `{type_name}` participates but has no value"
                            ))
                        })?;
                        stack.push((value, depth));
                    }
                }
                ViewMut::Sequence(items) => stack.extend(items.rev().map(|item| (item, depth))),
                ViewMut::Primitive(target) => {
                    let mut buf = [0u8; MAX_PRIMITIVE_SIZE];
                    let size = target.size();
                    self.input.read_exact(&mut buf[..size])?;
                    self.order.read(target, &buf[..size]);
                }
                ViewMut::Unsupported(reason) => {
                    return Err(CodecError::unsupported(type_name, reason));
                }
            }
        }

        Ok(())
    }
}
