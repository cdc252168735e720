use crate::{
    order::Endian,
    wire::{Field, FieldMut, View, ViewMut, Wire},
};

/// Tuples are Fixed-Field-Containers whose fields keep their declared order.
macro_rules! impl_wire_for_tuple {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: Wire,)+> Wire for ($($T,)+) {
            fn view(&self, _order: Endian) -> View<'_> {
                View::Fields(vec![$(Field::new(stringify!($idx), None, &self.$idx)),+])
            }

            fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
                ViewMut::Fields(vec![$(FieldMut::new(stringify!($idx), None, &mut self.$idx)),+])
            }
        }
    };
}

impl_wire_for_tuple!(T0; 0);
impl_wire_for_tuple!(T0, T1; 0, 1);
impl_wire_for_tuple!(T0, T1, T2; 0, 1, 2);
impl_wire_for_tuple!(T0, T1, T2, T3; 0, 1, 2, 3);
impl_wire_for_tuple!(T0, T1, T2, T3, T4; 0, 1, 2, 3, 4);
impl_wire_for_tuple!(T0, T1, T2, T3, T4, T5; 0, 1, 2, 3, 4, 5);
impl_wire_for_tuple!(T0, T1, T2, T3, T4, T5, T6; 0, 1, 2, 3, 4, 5, 6);
impl_wire_for_tuple!(T0, T1, T2, T3, T4, T5, T6, T7; 0, 1, 2, 3, 4, 5, 6, 7);

impl Wire for () {
    fn view(&self, _order: Endian) -> View<'_> {
        View::Fields(Vec::new())
    }

    fn view_mut(&mut self, _order: Endian) -> ViewMut<'_> {
        ViewMut::Fields(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_fields_are_untagged() {
        let value = (1u8, 2u32, true);
        let View::Fields(fields) = value.view(Endian::Big) else {
            panic!("expected fields");
        };
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["0", "1", "2"]);
        assert!(fields.iter().all(|f| f.tag.is_none() && f.value.is_some()));
    }
}
