use crate::{
    order::Endian,
    wire::{Slot, View, ViewMut, Wire},
};

/// `Option<T>` is the Optional-Reference: `None` is encoded as a default `T`
/// and is replaced by one before decoding into it.
impl<T: Wire + Default + 'static> Wire for Option<T> {
    fn view(&self, _order: Endian) -> View<'_> {
        match self {
            Some(target) => View::Reference(target),
            None => View::Vacant(Box::new(T::default())),
        }
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Reference(self)
    }
}

impl<T: Wire + Default> Slot for Option<T> {
    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn fill_default(&mut self) {
        *self = Some(T::default());
    }

    fn target_mut(&mut self) -> Option<&mut dyn Wire> {
        self.as_mut().map(|target| target as &mut dyn Wire)
    }
}

impl<T: Wire + ?Sized> Wire for Box<T> {
    fn view(&self, order: Endian) -> View<'_> {
        (**self).view(order)
    }

    fn view_mut(&mut self, order: Endian) -> ViewMut<'_> {
        (**self).view_mut(order)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}
