use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

// Opaque leaf types: compared, cloned and serialized as a whole.
macro_rules! impl_native_opaque {
    ($($ty:ty => $path:literal, $name:literal;)*) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    $path
                }

                #[inline]
                fn type_name() -> &'static str {
                    $name
                }
            }

            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| {
                        TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_default::<Self>())
                    })
                }
            }

            impl Reflect for $ty {
                crate::impls::impl_simple_type_reflect!(Opaque);
            }
        )*
    };
}

impl_native_opaque! {
    bool => "bool", "bool";
    char => "char", "char";
    i8 => "i8", "i8";
    i16 => "i16", "i16";
    i32 => "i32", "i32";
    i64 => "i64", "i64";
    i128 => "i128", "i128";
    isize => "isize", "isize";
    u8 => "u8", "u8";
    u16 => "u16", "u16";
    u32 => "u32", "u32";
    u64 => "u64", "u64";
    u128 => "u128", "u128";
    usize => "usize", "usize";
    f32 => "f32", "f32";
    f64 => "f64", "f64";
    String => "alloc::string::String", "String";
    &'static str => "&str", "&str";
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};

    #[test]
    fn opaque_leaves() {
        let mut x = 1_i64;
        assert_eq!(x.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(x.reflect_partial_eq(&1_i64), Some(true));
        assert_eq!(x.reflect_partial_eq(&1_i32), Some(false));

        x.set(Box::new(7_i64)).unwrap();
        assert_eq!(x, 7);
        assert!(x.set(Box::new(7_u64)).is_err());
        assert_eq!(x, 7);
    }

    #[test]
    fn string_paths_and_default() {
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(<&'static str>::type_name(), "&str");

        let value = String::type_info().default_value().unwrap();
        assert_eq!(value.downcast_ref::<String>(), Some(&String::new()));
    }

    #[test]
    fn debug_uses_std_debug() {
        let value: Box<dyn Reflect> = Box::new(String::from("hi"));
        assert_eq!(format!("{value:?}"), "\"hi\"");
    }
}
