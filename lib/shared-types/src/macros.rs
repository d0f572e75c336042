/// Implements [`std::str::FromStr`], [`std::fmt::Display`], [`std::convert::From`] and [`std::convert::Into`] for a newtype that wraps a String
macro_rules! impls_for_string_newtype {
    ($newtype: ty) => {
        impl std::str::FromStr for $newtype {
            type Err = $crate::EmptyIdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err($crate::EmptyIdentifierError(stringify!($newtype)));
                }

                Ok(Self(s.to_owned()))
            }
        }

        impl std::cmp::PartialEq<str> for $newtype {
            fn eq(&self, other: &str) -> bool {
                self.0.eq(other)
            }
        }

        impl std::cmp::PartialEq<&str> for $newtype {
            fn eq(&self, other: &&str) -> bool {
                self.0.eq(*other)
            }
        }

        impl std::convert::AsRef<str> for $newtype {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $newtype {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::convert::From<&str> for $newtype {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        $crate::macros::impl_display!($newtype);
        $crate::macros::impl_from!($newtype; String);
        $crate::macros::impl_into!($newtype; String);
    };
}
pub(crate) use impls_for_string_newtype;

/// Adds a `new_random()` constructor producing a random UUID v4 backed identifier.
macro_rules! impl_new_random {
    ($newtype: ty) => {
        impl $newtype {
            pub fn new_random() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }
    };
}
pub(crate) use impl_new_random;

/// Implements [`std::fmt::Display`] for a newtype, assuming that the inner type implements Display.
macro_rules! impl_display {
    ($newtype: ty) => {
        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
pub(crate) use impl_display;

/// Implements [`std::convert::From`]
macro_rules! impl_from {
    ($newtype: ty; $inner: ty) => {
        impl std::convert::From<$inner> for $newtype {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}
pub(crate) use impl_from;

/// Implements [`std::convert::Into`]
macro_rules! impl_into {
    ($newtype: ty; $inner: ty) => {
        impl std::convert::From<$newtype> for $inner {
            fn from(value: $newtype) -> Self {
                value.0.into()
            }
        }
    };
}
pub(crate) use impl_into;
