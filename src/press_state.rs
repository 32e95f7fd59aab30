//! Boolean press state per enumeration member.

use crate::index_map::IndexedEnum;
use std::fmt;
use std::marker::PhantomData;

const WORD_BITS: usize = u64::BITS as usize;

/// Word-packed bitset with one bit per member of `T`.
///
/// Sized from `T::index_map()` at construction. The sentinel member has an index
/// but is never settable, so `is_pressed(T::NONE)` is always `false`.
#[derive(Clone, PartialEq, Eq)]
pub struct PressState<T: IndexedEnum> {
    words: Vec<u64>,
    _members: PhantomData<T>,
}

impl<T: IndexedEnum> PressState<T> {
    pub fn new() -> Self {
        let len = T::index_map().len();
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            _members: PhantomData,
        }
    }

    /// Set or clear the bit for `member`.
    ///
    /// Returns `false` (and changes nothing) for the sentinel.
    pub fn set(&mut self, member: T, down: bool) -> bool {
        let Some(idx) = T::index_map().state_index(member) else {
            return false;
        };
        let (word, bit) = (idx / WORD_BITS, idx % WORD_BITS);
        if down {
            self.words[word] |= 1 << bit;
        } else {
            self.words[word] &= !(1 << bit);
        }
        true
    }

    #[inline]
    pub fn is_pressed(&self, member: T) -> bool {
        match T::index_map().state_index(member) {
            Some(idx) => self.words[idx / WORD_BITS] & (1 << (idx % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// Members currently pressed, in index order.
    pub fn pressed(&self) -> impl Iterator<Item = T> + '_ {
        T::index_map()
            .members()
            .iter()
            .copied()
            .filter(move |&m| self.is_pressed(m))
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }
}

impl<T: IndexedEnum> Default for PressState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IndexedEnum> fmt::Debug for PressState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pressed()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{MouseButtons, Scancodes};

    #[test]
    fn set_and_clear() {
        let mut s = PressState::<MouseButtons>::new();
        assert!(s.set(MouseButtons::Mouse2, true));
        assert!(s.is_pressed(MouseButtons::Mouse2));
        assert!(!s.is_pressed(MouseButtons::Mouse1));
        s.set(MouseButtons::Mouse2, false);
        assert!(!s.is_pressed(MouseButtons::Mouse2));
        assert!(!s.any());
    }

    #[test]
    fn sentinel_is_never_settable() {
        let mut s = PressState::<Scancodes>::new();
        assert!(!s.set(Scancodes::None, true));
        assert!(!s.is_pressed(Scancodes::None));
        assert!(!s.any());
    }

    #[test]
    fn spans_multiple_words() {
        // Scancodes has more than 64 members.
        let mut s = PressState::<Scancodes>::new();
        s.set(Scancodes::RGui, true);
        s.set(Scancodes::A, true);
        let pressed: Vec<_> = s.pressed().collect();
        assert_eq!(pressed, vec![Scancodes::A, Scancodes::RGui]);
        s.clear();
        assert_eq!(s.pressed().count(), 0);
    }
}
