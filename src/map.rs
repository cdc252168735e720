use std::collections::{BTreeMap, HashMap};

use crate::{
    order::Endian,
    wire::{View, ViewMut, Wire},
};

const REASON: &str = "key-value maps have no wire layout";

impl<K, V, S> Wire for HashMap<K, V, S> {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Unsupported(REASON)
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Unsupported(REASON)
    }
}

impl<K, V> Wire for BTreeMap<K, V> {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Unsupported(REASON)
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Unsupported(REASON)
    }
}
