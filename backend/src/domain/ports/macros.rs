//! Helper macro for generating domain port error enums.
//!
//! Every driven port distinguishes connection failures (the store is
//! unreachable) from query failures (the operation itself broke). The macro
//! stamps out the enum, its `thiserror` display, and snake_case constructors
//! that accept anything displayable.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>](message: impl ::std::fmt::Display) -> Self {
                        Self::$variant { message: message.to_string() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
