pub use self::serde_helpers::*;

mod serde_helpers;

#[doc(hidden)]
pub use serde as __serde;

/// Declares a closed enum whose members are identified by fixed string literals.
///
/// Generates `as_str`, `VALUES`, `FromStr`, `Display` and string-based serde
/// impls. Parsing or deserializing anything outside the declared set fails
/// with [`UnknownEnumVariant`].
#[macro_export]
macro_rules! define_string_enum {
    ($(#[$outer:meta])* $vis:vis enum $type:ident { $($(#[$inner:meta])* $variant:ident => $value:literal),*$(,)? }) => {
        $(#[$outer])*
        $vis enum $type {
            $($(#[$inner])* $variant),*,
        }

        impl $type {
            /// All members in declaration order
            $vis const VALUES: &'static [Self] = &[$(Self::$variant),*];

            #[inline(always)]
            $vis fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),*,
                }
            }
        }

        impl std::str::FromStr for $type {
            type Err = $crate::UnknownEnumVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($value => Self::$variant),*,
                    _ => return Err($crate::UnknownEnumVariant::new(stringify!($type), s)),
                })
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &'_ mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::__serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                $crate::serde_string::deserialize(deserializer)
            }
        }
    };
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {enum_name} variant: {value:?}")]
pub struct UnknownEnumVariant {
    pub enum_name: &'static str,
    pub value: String,
}

impl UnknownEnumVariant {
    pub fn new(enum_name: &'static str, value: &str) -> Self {
        Self {
            enum_name,
            value: value.to_owned(),
        }
    }
}
