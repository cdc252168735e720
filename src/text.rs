use crate::{
    order::Endian,
    wire::{View, ViewMut, Wire},
};

/// Encodes as raw UTF-8 with no length. Without a length on the wire there is
/// nothing to size the decode by, so decoding plain text is a shape error;
/// use a length-prefixed type such as `String8` instead.
impl Wire for String {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Text(self.as_bytes())
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Unsupported("variable-length text needs a custom codec to decode")
    }
}
