//! Type-safe identifier wrappers around the server's integer ids.
//!
//! Elevators and passengers are both numbered with plain integers on the
//! wire. Wrapping them keeps an elevator id from ever being passed where a
//! passenger id is expected. Both serialize as the bare integer.

use serde::{Deserialize, Serialize};

/// A floor number. Floors are numbered from 1 up to the configured maximum.
pub type Floor = u32;

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw server id.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }

            /// The id as a slot index into per-tick tables.
            ///
            /// Returns `None` only on targets where `usize` is narrower
            /// than `u32`.
            pub fn index(self) -> Option<usize> {
                usize::try_from(self.0).ok()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of an elevator car. Stable for the whole simulation run.
    ElevatorId
}

define_id! {
    /// Identifier of a passenger (a "call" on the wire).
    PassengerId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&ElevatorId::new(3)).ok();
        assert_eq!(json.as_deref(), Some("3"));

        let restored: Result<PassengerId, _> = serde_json::from_str("17");
        assert_eq!(restored.ok(), Some(PassengerId::new(17)));
    }

    #[test]
    fn id_display_matches_integer() {
        assert_eq!(ElevatorId::new(2).to_string(), "2");
    }

    #[test]
    fn index_matches_raw_value() {
        assert_eq!(ElevatorId::new(5).index(), Some(5));
    }
}
