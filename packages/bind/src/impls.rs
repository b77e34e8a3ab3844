//! `Bindable` for the standard scalars and containers.

use kvbind_core_store::Error;

use crate::schema::{Bindable, Kind, Scalar, ScalarKind};

fn mismatch(target: &'static str, scalar: &Scalar) -> Error {
    Error::coercion(format!("{:?}", scalar), target, "mismatched scalar family")
}

macro_rules! bind_signed {
    ($($ty:ty),*) => {
        $(
            impl Bindable for $ty {
                fn kind(&self) -> Kind {
                    Kind::Scalar(ScalarKind::Int)
                }

                fn type_name(&self) -> &'static str {
                    stringify!($ty)
                }

                fn scalar(&self) -> Option<Scalar> {
                    Some(Scalar::Int(*self as i64))
                }

                fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
                    match scalar {
                        // Wraps on overflow
                        Scalar::Int(v) => {
                            *self = v as $ty;
                            Ok(())
                        }
                        other => Err(mismatch(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

macro_rules! bind_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Bindable for $ty {
                fn kind(&self) -> Kind {
                    Kind::Scalar(ScalarKind::Uint)
                }

                fn type_name(&self) -> &'static str {
                    stringify!($ty)
                }

                fn scalar(&self) -> Option<Scalar> {
                    Some(Scalar::Uint(*self as u64))
                }

                fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
                    match scalar {
                        Scalar::Uint(v) => {
                            *self = v as $ty;
                            Ok(())
                        }
                        other => Err(mismatch(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

bind_signed!(i8, i16, i32, i64, isize);
bind_unsigned!(u8, u16, u32, u64, usize);

impl Bindable for f32 {
    fn kind(&self) -> Kind {
        Kind::Scalar(ScalarKind::Float)
    }

    fn type_name(&self) -> &'static str {
        "f32"
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(Scalar::F32(*self))
    }

    fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
        match scalar {
            Scalar::F32(v) => *self = v,
            Scalar::F64(v) => *self = v as f32,
            other => return Err(mismatch("f32", &other)),
        }
        Ok(())
    }
}

impl Bindable for f64 {
    fn kind(&self) -> Kind {
        Kind::Scalar(ScalarKind::Float)
    }

    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(Scalar::F64(*self))
    }

    fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
        match scalar {
            Scalar::F32(v) => *self = f64::from(v),
            Scalar::F64(v) => *self = v,
            other => return Err(mismatch("f64", &other)),
        }
        Ok(())
    }
}

impl Bindable for bool {
    fn kind(&self) -> Kind {
        Kind::Scalar(ScalarKind::Bool)
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(Scalar::Bool(*self))
    }

    fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
        match scalar {
            Scalar::Bool(v) => {
                *self = v;
                Ok(())
            }
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl Bindable for String {
    fn kind(&self) -> Kind {
        Kind::Scalar(ScalarKind::String)
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(Scalar::Str(self.clone()))
    }

    fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
        match scalar {
            Scalar::Str(v) => {
                *self = v;
                Ok(())
            }
            other => Err(mismatch("String", &other)),
        }
    }
}

impl<T: Bindable + Default> Bindable for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Slice
    }

    fn elements(&self) -> Vec<&dyn Bindable> {
        self.iter().map(|element| element as &dyn Bindable).collect()
    }

    fn clear_elements(&mut self) {
        self.clear();
    }

    fn push_element(&mut self) -> Option<&mut dyn Bindable> {
        self.push(T::default());
        self.last_mut().map(|element| element as &mut dyn Bindable)
    }
}

impl<T: Bindable> Bindable for Box<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn pointee(&self) -> Option<&dyn Bindable> {
        Some(&**self as &dyn Bindable)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Bindable> {
        Some(&mut **self as &mut dyn Bindable)
    }
}

/// A nullable pointer: `None` is a nil pointer.
impl<T: Bindable> Bindable for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn pointee(&self) -> Option<&dyn Bindable> {
        self.as_ref().map(|value| value as &dyn Bindable)
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Bindable> {
        self.as_mut().map(|value| value as &mut dyn Bindable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_narrowing_wraps() {
        let mut small = 0i8;
        small.set_scalar(Scalar::Int(300)).unwrap();
        assert_eq!(small, 44);

        let mut wide = 0i64;
        wide.set_scalar(Scalar::Int(-5)).unwrap();
        assert_eq!(wide, -5);
    }

    #[test]
    fn unsigned_narrowing_wraps() {
        let mut byte = 0u8;
        byte.set_scalar(Scalar::Uint(257)).unwrap();
        assert_eq!(byte, 1);
    }

    #[test]
    fn mismatched_family_is_a_coercion_error() {
        let mut flag = false;
        let result = flag.set_scalar(Scalar::Str("yes".to_string()));
        assert!(matches!(result, Err(Error::Coercion { target: "bool", .. })));

        let mut port = 0u16;
        assert!(port.set_scalar(Scalar::Int(1)).is_err());
    }

    #[test]
    fn floats_accept_both_widths() {
        let mut single = 0f32;
        single.set_scalar(Scalar::F64(1.5)).unwrap();
        assert_eq!(single, 1.5);

        let mut double = 0f64;
        double.set_scalar(Scalar::F32(0.25)).unwrap();
        assert_eq!(double, 0.25);
    }

    #[test]
    fn vec_grows_default_elements() {
        let mut items: Vec<u32> = vec![9];
        items.clear_elements();
        items
            .push_element()
            .unwrap()
            .set_scalar(Scalar::Uint(7))
            .unwrap();
        assert_eq!(items, vec![7]);
        assert_eq!(items.elements().len(), 1);
    }

    #[test]
    fn option_points_nowhere_when_none() {
        let none: Option<String> = None;
        assert_eq!(none.kind(), Kind::Pointer);
        assert!(none.pointee().is_none());

        let some = Some("x".to_string());
        assert_eq!(
            some.pointee().and_then(|value| value.scalar()),
            Some(Scalar::Str("x".to_string()))
        );
    }

    #[test]
    fn boxed_value_is_a_pointer() {
        let mut boxed = Box::new(3i32);
        boxed
            .pointee_mut()
            .unwrap()
            .set_scalar(Scalar::Int(4))
            .unwrap();
        assert_eq!(*boxed, 4);
    }
}
