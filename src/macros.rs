/// Declares a `#[repr(u32)]` enum with the native discriminants, plus the
/// conversions every descriptor enum needs: `TryFrom<u32>`, `From<_> for u32`,
/// `Display` and case-insensitive `FromStr` on the variant name.
macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($what:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr,
            )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::error::Error;

            fn try_from(value: u32) -> $crate::error::Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| *variant as u32 == value)
                    .ok_or($crate::error::Error::OutOfRange { what: $what, value })
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value as u32
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::error::Error::UnknownName {
                        what: $what,
                        name: s.to_string(),
                    })
            }
        }
    };
}

/// Declares a read-only, driver-filled structure: private fields in native
/// order, a zeroed `Default`, and one getter per field.
macro_rules! read_only_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $getter:ident -> $ret:ty,
            )+
        }
    ) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name {
            $($field: $ty,)+
        }

        impl $name {
            $(
                $(#[$fmeta])*
                pub fn $getter(&self) -> $ret {
                    self.$field.into()
                }
            )+
        }
    };
}

pub(crate) use native_enum;
pub(crate) use read_only_struct;

/// Declares a trait through which resolution code reads a borrowed object's
/// current description, implemented for the description itself, for
/// references, and for `Option` (where `None` is a null reference).
macro_rules! describe_trait {
    ($(#[$meta:meta])* $vis:vis trait $name:ident -> $desc:ty, $what:literal;) => {
        $(#[$meta])*
        $vis trait $name {
            fn desc(&self) -> $crate::error::Result<$desc>;
        }

        impl $name for $desc {
            fn desc(&self) -> $crate::error::Result<$desc> {
                Ok(*self)
            }
        }

        impl<T: $name + ?Sized> $name for &T {
            fn desc(&self) -> $crate::error::Result<$desc> {
                (**self).desc()
            }
        }

        impl<T: $name> $name for Option<T> {
            fn desc(&self) -> $crate::error::Result<$desc> {
                self.as_ref()
                    .ok_or($crate::error::Error::NullReference($what))?
                    .desc()
            }
        }
    };
}

pub(crate) use describe_trait;
