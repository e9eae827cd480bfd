// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. The grid
// only ever needs absolute cursor positioning and plain character output;
// the rest is used once on enter/leave (clear, cursor visibility).
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2) and home the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J\x1b[H")
}

// ─── Characters ──────────────────────────────────────────────────────────────

/// Write one character at the current cursor position as UTF-8.
#[inline]
pub fn put_char(w: &mut impl Write, ch: char) -> io::Result<()> {
    let mut enc = [0u8; 4];
    w.write_all(ch.encode_utf8(&mut enc).as_bytes())
}

/// Write a run of text at the current cursor position.
#[inline]
pub fn put_str(w: &mut impl Write, s: &str) -> io::Result<()> {
    w.write_all(s.as_bytes())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_position() {
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        assert_eq!(emit(|w| cursor_to(w, u16::MAX, u16::MAX)), "\x1b[65536;65536H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn clear_screen_homes_cursor() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J\x1b[H");
    }

    #[test]
    fn put_char_ascii() {
        assert_eq!(emit(|w| put_char(w, '@')), "@");
    }

    #[test]
    fn put_char_multibyte() {
        assert_eq!(emit(|w| put_char(w, 'é')), "é");
        assert_eq!(emit(|w| put_char(w, '█')), "█");
    }

    #[test]
    fn put_str_passes_through() {
        assert_eq!(emit(|w| put_str(w, "Command: ")), "Command: ");
    }
}
