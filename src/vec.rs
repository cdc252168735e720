use crate::{
    order::Endian,
    wire::{View, ViewMut, Wire},
};

/// Fixed-length arrays: `N` elements, no length on the wire.
impl<T: Wire, const N: usize> Wire for [T; N] {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Sequence(Box::new(self.iter().map(|item| item as &dyn Wire)))
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Sequence(Box::new(self.iter_mut().map(|item| item as &mut dyn Wire)))
    }
}

/// Variable-length lists. Nothing records the length on the wire, so a
/// vector decodes exactly as many elements as it already holds; use a
/// custom codec (for example a length-prefixed wrapper) when the count
/// comes from the input.
impl<T: Wire> Wire for Vec<T> {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Sequence(Box::new(self.iter().map(|item| item as &dyn Wire)))
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Sequence(Box::new(self.iter_mut().map(|item| item as &mut dyn Wire)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;

    #[test]
    fn test_sequence_preserves_index_order() {
        let values = vec![1u16, 2, 3];
        let View::Sequence(items) = values.view(Endian::Big) else {
            panic!("expected a sequence");
        };
        let seen: Vec<_> = items
            .map(|item| match item.view(Endian::Big) {
                View::Primitive(Primitive::U16(v)) => v,
                _ => panic!("expected u16"),
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_array() {
        let values: [u8; 0] = [];
        let View::Sequence(mut items) = values.view(Endian::Little) else {
            panic!("expected a sequence");
        };
        assert!(items.next().is_none());
    }
}
