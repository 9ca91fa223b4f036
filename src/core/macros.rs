//! Macros for declaring lifecycle states.

/// Declare a lifecycle state enum and implement `State` for it.
///
/// Variant names double as state names. States listed under `terminal`
/// report `is_final() == true`; every other state accepts further events.
/// Attributes before the enum (docs, extra derives) are kept.
///
/// # Example
///
/// ```
/// use cloudconnect::core::State;
/// use cloudconnect::state_enum;
///
/// state_enum! {
///     #[derive(Copy, Eq)]
///     pub enum DiskState {
///         Attached,
///         Detached,
///         Destroyed,
///     }
///     terminal: [Destroyed]
/// }
///
/// assert_eq!(DiskState::Attached.name(), "Attached");
/// assert!(DiskState::Destroyed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident),+ $(,)?
        }
        $(terminal: [$($terminal:ident),+ $(,)?])?
    ) => {
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $($variant),+
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$terminal)|+ => true,)?
                    _ => false,
                }
            }
        }
    };
}
