//! Typed handles for flowsheet entities.
//!
//! Handles are positions in insertion order, stored offset by one so that
//! `Option<StreamId>` costs no extra space.

use core::fmt;
use core::num::NonZeroU32;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Handle for the 0-based position `index`. Saturates near `u32::MAX`.
            pub fn from_index(index: u32) -> Self {
                Self(NonZeroU32::MIN.saturating_add(index))
            }

            /// 0-based position.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }

            /// Position as `usize`, for slice access.
            pub fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

define_id!(
    /// Stream position in a flowsheet.
    StreamId
);
define_id!(
    /// Unit position in a flowsheet.
    UnitId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_survive_the_offset() {
        for i in [0u32, 1, 17, 40_000] {
            let id = StreamId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.slot(), i as usize);
        }
    }

    #[test]
    fn option_is_niche_packed() {
        assert_eq!(
            core::mem::size_of::<Option<UnitId>>(),
            core::mem::size_of::<UnitId>()
        );
    }

    #[test]
    fn formatting() {
        let id = UnitId::from_index(3);
        assert_eq!(format!("{id}"), "3");
        assert_eq!(format!("{id:?}"), "UnitId(3)");
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let id = StreamId::from_index(u32::MAX);
        assert_eq!(id.index(), u32::MAX - 1);
    }
}
