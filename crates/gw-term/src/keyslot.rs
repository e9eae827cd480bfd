// SPDX-License-Identifier: MIT
//
// Pending keystroke slot — the hand-off between stdin and the tick.
//
// There is no input queue. The reader stores the most recent keystroke,
// overwriting anything the loop has not consumed yet, and the loop takes
// it (leaving the slot empty) once per tick. Two keys pressed within one
// tick therefore collapse to the second one. That loss is part of the
// contract: the game reacts to "what is the player pressing now", not to
// a backlog of keypresses.
//
// Store and take each hold the mutex for exactly one operation, so a tick
// never observes a half-written value.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

// ─── Keystroke ───────────────────────────────────────────────────────────────

/// A single captured key, as a Unicode code point.
///
/// Control keys are identified by value: several of them (delete, carriage
/// return) have no printable form, so comparing display strings would not
/// work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke(u32);

impl Keystroke {
    /// Carriage return — submits the command line.
    pub const SUBMIT: Self = Self(13);
    /// Escape — cancels the command line.
    pub const ESCAPE: Self = Self(27);
    /// DEL — what terminals send for the backspace key in raw mode.
    pub const BACKSPACE: Self = Self(127);

    /// Wrap a raw code point.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    /// The raw code point.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// The key as a `char`, if the code point is a valid scalar value.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// Whether this key produces visible text.
    ///
    /// C0 controls (0–31), DEL (127) and C1 controls (128–159) are not
    /// printable; everything else that is a valid `char` is.
    #[must_use]
    pub fn is_printable(self) -> bool {
        match self.as_char() {
            Some(ch) => !ch.is_control(),
            None => false,
        }
    }
}

impl From<char> for Keystroke {
    fn from(ch: char) -> Self {
        Self(ch as u32)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SUBMIT => f.write_str("<Enter>"),
            Self::ESCAPE => f.write_str("<Esc>"),
            Self::BACKSPACE => f.write_str("<BS>"),
            key if key.is_printable() => match key.as_char() {
                Some(ch) => write!(f, "{ch}"),
                None => write!(f, "<{}>", key.0),
            },
            key => write!(f, "<{}>", key.0),
        }
    }
}

// ─── KeySlot ─────────────────────────────────────────────────────────────────

/// Single-producer / single-consumer slot holding at most one keystroke.
///
/// Cloning shares the same slot: hand one clone to the stdin reader and
/// keep the other for the loop.
///
/// # Examples
///
/// ```
/// use gw_term::keyslot::{KeySlot, Keystroke};
///
/// let slot = KeySlot::new();
/// slot.store(Keystroke::from('w'));
/// slot.store(Keystroke::from('d'));
///
/// assert_eq!(slot.take(), Some(Keystroke::from('d')));
/// assert_eq!(slot.take(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeySlot {
    inner: Arc<Mutex<Option<Keystroke>>>,
}

impl KeySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a keystroke, replacing any value the loop has not taken yet.
    pub fn store(&self, key: Keystroke) {
        // A poisoned lock still holds a valid Option; keep going.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(key);
    }

    /// Read the pending keystroke and leave the slot empty.
    #[must_use]
    pub fn take(&self) -> Option<Keystroke> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // ── Keystroke ─────────────────────────────────────────────────

    #[test]
    fn control_codes_have_fixed_values() {
        assert_eq!(Keystroke::SUBMIT.code(), 13);
        assert_eq!(Keystroke::ESCAPE.code(), 27);
        assert_eq!(Keystroke::BACKSPACE.code(), 127);
    }

    #[test]
    fn letters_are_printable() {
        assert!(Keystroke::from('w').is_printable());
        assert!(Keystroke::from(' ').is_printable());
        assert!(Keystroke::from('é').is_printable());
    }

    #[test]
    fn control_codes_are_not_printable() {
        assert!(!Keystroke::SUBMIT.is_printable());
        assert!(!Keystroke::ESCAPE.is_printable());
        assert!(!Keystroke::BACKSPACE.is_printable());
        assert!(!Keystroke::from_code(3).is_printable());
    }

    #[test]
    fn invalid_scalar_is_not_printable() {
        let surrogate = Keystroke::from_code(0xD800);
        assert_eq!(surrogate.as_char(), None);
        assert!(!surrogate.is_printable());
    }

    #[test]
    fn display_names_control_keys() {
        assert_eq!(Keystroke::SUBMIT.to_string(), "<Enter>");
        assert_eq!(Keystroke::BACKSPACE.to_string(), "<BS>");
        assert_eq!(Keystroke::from('x').to_string(), "x");
        assert_eq!(Keystroke::from_code(1).to_string(), "<1>");
    }

    // ── KeySlot ───────────────────────────────────────────────────

    #[test]
    fn empty_slot_yields_none() {
        assert_eq!(KeySlot::new().take(), None);
    }

    #[test]
    fn take_clears_the_slot() {
        let slot = KeySlot::new();
        slot.store(Keystroke::from('a'));
        assert_eq!(slot.take(), Some(Keystroke::from('a')));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn second_store_before_take_wins() {
        let slot = KeySlot::new();
        slot.store(Keystroke::from('w'));
        slot.store(Keystroke::from('s'));
        assert_eq!(slot.take(), Some(Keystroke::from('s')));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn clones_share_state() {
        let producer = KeySlot::new();
        let consumer = producer.clone();
        producer.store(Keystroke::SUBMIT);
        assert_eq!(consumer.take(), Some(Keystroke::SUBMIT));
        assert_eq!(producer.take(), None);
    }

    #[test]
    fn store_from_another_thread() {
        let slot = KeySlot::new();
        let producer = slot.clone();
        thread::spawn(move || producer.store(Keystroke::from('q')))
            .join()
            .unwrap();
        assert_eq!(slot.take(), Some(Keystroke::from('q')));
    }
}
