//! Dense, per-process indices for closed enumerations.
//!
//! Press-state sets and axis arrays are sized and addressed through a
//! [`StableIndexMap`]. Each enumeration declared with [`indexed_enum!`] owns a
//! lazily built map, constructed on first use and immutable afterwards.
//!
//! ## Stability
//! Indices are stable for the lifetime of one process run only. They follow
//! declaration order today, but nothing outside this crate should rely on that:
//! never persist an index or compare indices across processes or versions.
//! Serialize members by name instead (every indexed enum derives `serde`).

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed enumeration with a `None`/unknown sentinel member.
///
/// Implemented through [`indexed_enum!`]; implementing it by hand is possible
/// but the `ALL` list must name every member exactly once.
pub trait IndexedEnum: Copy + Eq + Hash + Debug + 'static {
    /// Every member, sentinel included.
    const ALL: &'static [Self];

    /// The "none/unknown" sentinel. Never has a settable state bit.
    const NONE: Self;

    /// The process-wide index map for this enumeration.
    fn index_map() -> &'static StableIndexMap<Self>;

    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Bidirectional member ↔ dense index lookup for one enumeration.
#[derive(Debug)]
pub struct StableIndexMap<T: IndexedEnum> {
    by_member: HashMap<T, usize>,
    members: Vec<T>,
}

impl<T: IndexedEnum> StableIndexMap<T> {
    /// Build the map over `T::ALL`. Total: a repeated member keeps its first index.
    pub fn build() -> Self {
        let mut by_member = HashMap::with_capacity(T::ALL.len());
        let mut members = Vec::with_capacity(T::ALL.len());
        for &member in T::ALL {
            if by_member.contains_key(&member) {
                continue;
            }
            by_member.insert(member, members.len());
            members.push(member);
        }
        Self { by_member, members }
    }

    /// Number of indexed members (`|E|`).
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Dense index of `member`, in `[0, len)`.
    #[inline]
    pub fn index_of(&self, member: T) -> Option<usize> {
        self.by_member.get(&member).copied()
    }

    /// Dense index of `member`, or `None` for the sentinel.
    ///
    /// This is the lookup state containers use: the sentinel is indexed but
    /// never addressable.
    #[inline]
    pub fn state_index(&self, member: T) -> Option<usize> {
        if member.is_none() {
            return None;
        }
        self.index_of(member)
    }

    /// Inverse lookup.
    #[inline]
    pub fn member(&self, index: usize) -> Option<T> {
        self.members.get(index).copied()
    }

    /// Members in index order.
    pub fn members(&self) -> &[T] {
        &self.members
    }
}

/// Declare a closed enumeration and its [`IndexedEnum`] implementation.
///
/// The first listed variant is the sentinel.
///
/// ```
/// inputdeck::indexed_enum! {
///     #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
///     pub enum Pedal { None, Clutch, Brake, Throttle }
/// }
/// use inputdeck::IndexedEnum;
/// assert_eq!(Pedal::index_map().len(), 4);
/// assert!(Pedal::NONE.is_none());
/// ```
#[macro_export]
macro_rules! indexed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$none_meta:meta])*
            $none:ident
            $(, $(#[$vmeta:meta])* $variant:ident)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(#[$none_meta])*
            $none,
            $($(#[$vmeta])* $variant,)*
        }

        impl $crate::index_map::IndexedEnum for $name {
            const ALL: &'static [Self] = &[$name::$none $(, $name::$variant)*];
            const NONE: Self = $name::$none;

            fn index_map() -> &'static $crate::index_map::StableIndexMap<Self> {
                static MAP: ::std::sync::OnceLock<$crate::index_map::StableIndexMap<$name>> =
                    ::std::sync::OnceLock::new();
                MAP.get_or_init($crate::index_map::StableIndexMap::build)
            }
        }
    };
}
