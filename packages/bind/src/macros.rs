//! The `bind_struct!` schema macro.

/// Implement [`Bindable`](crate::Bindable) for a struct from a field list.
///
/// Each listed field may carry a `.key("KEY")` annotation naming its external
/// key and a `.default("literal")` annotation used when the key is absent
/// and defaults are requested. Fields are bound in the order listed; fields
/// left out of the list are invisible to the engine.
///
/// # Example
///
/// ```rust
/// use kvbind_bind::{bind_struct, Bindable, Kind};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Service {
///     name: String,
///     port: u16,
///     debug: bool,
/// }
///
/// bind_struct!(Service {
///     name.key("NAME"),
///     port.key("PORT").default("8080"),
///     debug,
/// });
///
/// let service = Service::default();
/// assert_eq!(service.kind(), Kind::Struct);
/// assert_eq!(service.fields()[1].default, Some("8080"));
/// ```
#[macro_export]
macro_rules! bind_struct {
    ($ty:ty { $( $field:ident $( . $annotation:ident ( $literal:literal ) )* ),* $(,)? }) => {
        impl $crate::Bindable for $ty {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Struct
            }

            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn fields(&self) -> &'static [$crate::FieldTag] {
                const FIELDS: &[$crate::FieldTag] = &[
                    $( $crate::FieldTag::new(stringify!($field)) $( .$annotation($literal) )* ),*
                ];
                FIELDS
            }

            fn field(&self, index: usize) -> Option<&dyn $crate::Bindable> {
                let fields: &[&dyn $crate::Bindable] = &[
                    $( &self.$field as &dyn $crate::Bindable ),*
                ];
                fields.get(index).copied()
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(&mut self, index: usize) -> Option<&mut dyn $crate::Bindable> {
                let mut remaining = index;
                $(
                    if remaining == 0 {
                        return Some(&mut self.$field as &mut dyn $crate::Bindable);
                    }
                    remaining -= 1;
                )*
                None
            }
        }
    };
}
