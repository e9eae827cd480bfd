// SPDX-License-Identifier: MIT
//
// ScreenBuffer — the character grid and its in-place repaint paths.
//
// The grid mirrors what is on the terminal: one `char` per cell, row-major,
// always fully populated. Every mutation goes to the grid first and then
// out to the terminal as the smallest update that makes the screen match:
//
//   - `write_cell` moves to one coordinate and prints one character. This
//     is the hot path — a movement keypress costs two of these.
//   - `clear_all_except` / `fill_all_except` sweep the whole grid but only
//     emit the cells whose content actually changes, and skip the cursor
//     move when the next changed cell is directly to the right of the
//     previous one (the terminal auto-advances after a character).
//   - `write_status` rewrites the single line below the grid where prompts
//     and messages live.
//
// After every operation the cursor is parked at column 0 of the line below
// the grid (or at the end of the status text), so it never blinks on top
// of game content. Each operation reaches the sink as a single write.

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::ansi;
use crate::error::{Result, TermError};
use crate::output::OutputBuffer;

/// The character cleared cells are set to.
pub const BLANK: char = ' ';

// ─── SweepStats ──────────────────────────────────────────────────────────────

/// What a full-grid sweep did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepStats {
    /// Cells whose character changed and were sent to the terminal.
    pub cells_rewritten: usize,
    /// Cells left alone (the marker, or already holding the target).
    pub cells_skipped: usize,
}

impl SweepStats {
    /// Total cells visited (rewritten + skipped).
    #[inline]
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.cells_rewritten + self.cells_skipped
    }
}

// ─── ScreenBuffer ────────────────────────────────────────────────────────────

/// A fixed-size character grid that repaints the terminal cell by cell.
///
/// Generic over the output sink so tests can render into a `Vec<u8>`.
///
/// # Examples
///
/// ```
/// use gw_term::screen::ScreenBuffer;
///
/// let mut screen = ScreenBuffer::new(3, 3, Vec::new());
/// screen.initialize('.', '@', (1, 1))?;
/// assert_eq!(screen.get(1, 1), Some('@'));
/// assert_eq!(screen.get(0, 0), Some('.'));
///
/// screen.write_cell(0, 0, '#')?;
/// assert_eq!(screen.rows(), vec!["#..", ".@.", "..."]);
/// # Ok::<(), gw_term::TermError>(())
/// ```
pub struct ScreenBuffer<W: Write> {
    width: u16,
    height: u16,
    cells: Vec<char>,
    /// Display width of the text currently on the status line.
    status_width: usize,
    out: OutputBuffer,
    sink: W,
}

impl<W: Write> ScreenBuffer<W> {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a `width × height` grid of blanks writing to `sink`.
    ///
    /// Nothing is emitted until [`initialize`](Self::initialize) or a write.
    #[must_use]
    pub fn new(width: u16, height: u16, sink: W) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![BLANK; size],
            status_width: 0,
            out: OutputBuffer::new(),
            sink,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Grid width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Where the cursor rests between writes: column 0, first row below the grid.
    #[inline]
    #[must_use]
    pub const fn parking(&self) -> (u16, u16) {
        (0, self.height)
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// The character at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).ok().map(|i| self.cells[i])
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// The grid as one `String` per row.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); usize::from(self.height)];
        }
        self.cells
            .chunks(usize::from(self.width))
            .map(|row| row.iter().collect())
            .collect()
    }

    /// The output sink.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the output sink (tests drain it between steps).
    #[inline]
    pub const fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the buffer and return the sink.
    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Set one cell and repaint exactly that cell.
    ///
    /// # Errors
    ///
    /// [`TermError::OutOfBounds`] if `(x, y)` is outside the grid — the grid
    /// and the screen are left untouched. I/O errors from the sink.
    pub fn write_cell(&mut self, x: u16, y: u16, ch: char) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i] = ch;

        ansi::cursor_to(&mut self.out, x, y)?;
        ansi::put_char(&mut self.out, ch)?;
        self.park()?;
        self.commit()
    }

    /// Paint the whole grid once: `marker` at `player`, `background` elsewhere.
    ///
    /// Clears the terminal first, then writes every cell exactly once.
    ///
    /// # Errors
    ///
    /// [`TermError::OutOfBounds`] if `player` is outside the grid. I/O errors
    /// from the sink.
    pub fn initialize(&mut self, background: char, marker: char, player: (u16, u16)) -> Result<()> {
        let player_index = self.index(player.0, player.1)?;
        self.cells.fill(background);
        self.cells[player_index] = marker;
        self.status_width = 0;

        ansi::clear_screen(&mut self.out)?;
        if self.width > 0 {
            let width = usize::from(self.width);
            for (y, row) in (0..self.height).zip(self.cells.chunks(width)) {
                ansi::cursor_to(&mut self.out, 0, y)?;
                for &ch in row {
                    ansi::put_char(&mut self.out, ch)?;
                }
            }
        }
        self.park()?;
        self.commit()
    }

    /// Set every cell except those holding `marker` to [`BLANK`].
    ///
    /// # Errors
    ///
    /// I/O errors from the sink.
    pub fn clear_all_except(&mut self, marker: char) -> Result<SweepStats> {
        self.sweep(marker, BLANK)
    }

    /// Set every cell except those holding `marker` to `fill`.
    ///
    /// # Errors
    ///
    /// I/O errors from the sink.
    pub fn fill_all_except(&mut self, marker: char, fill: char) -> Result<SweepStats> {
        self.sweep(marker, fill)
    }

    /// Rewrite the status line below the grid with `text`.
    ///
    /// Leftovers of a longer previous text are blanked. The cursor is left
    /// right after the text, which is where typing continues on a prompt.
    ///
    /// # Errors
    ///
    /// I/O errors from the sink.
    pub fn write_status(&mut self, text: &str) -> Result<()> {
        let (col, row) = self.parking();
        let width = text.width();

        ansi::cursor_to(&mut self.out, col, row)?;
        ansi::put_str(&mut self.out, text)?;
        for _ in width..self.status_width {
            ansi::put_char(&mut self.out, BLANK)?;
        }
        // Terminal columns are u16; longer text leaves the cursor at the edge.
        let end = u16::try_from(width).unwrap_or(u16::MAX);
        ansi::cursor_to(&mut self.out, end, row)?;

        self.status_width = width;
        self.commit()
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn index(&self, x: u16, y: u16) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            Err(TermError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn sweep(&mut self, marker: char, target: char) -> Result<SweepStats> {
        let mut stats = SweepStats::default();
        // Where the terminal cursor is after the last emitted character.
        let mut cursor: Option<(u16, u16)> = None;

        for y in 0..self.height {
            for x in 0..self.width {
                let i = usize::from(y) * usize::from(self.width) + usize::from(x);
                let current = self.cells[i];
                if current == marker || current == target {
                    stats.cells_skipped += 1;
                    continue;
                }

                self.cells[i] = target;
                if cursor != Some((x, y)) {
                    ansi::cursor_to(&mut self.out, x, y)?;
                }
                ansi::put_char(&mut self.out, target)?;
                cursor = Some((x + 1, y));
                stats.cells_rewritten += 1;
            }
        }

        if stats.cells_rewritten > 0 {
            self.park()?;
        }
        self.commit()?;
        Ok(stats)
    }

    fn park(&mut self) -> Result<()> {
        let (col, row) = self.parking();
        ansi::cursor_to(&mut self.out, col, row)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.out.flush_to(&mut self.sink)?;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Take everything written to the sink so far.
    fn drain(screen: &mut ScreenBuffer<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(screen.sink_mut())).unwrap()
    }

    fn three_by_three() -> ScreenBuffer<Vec<u8>> {
        let mut screen = ScreenBuffer::new(3, 3, Vec::new());
        screen.initialize('.', '@', (1, 1)).unwrap();
        screen.sink_mut().clear();
        screen
    }

    // ── Construction ───────────────────────────────────────────────

    #[test]
    fn new_is_dense_and_blank() {
        let screen = ScreenBuffer::new(4, 2, Vec::new());
        assert_eq!(screen.cells().len(), 8);
        assert!(screen.cells().iter().all(|&c| c == BLANK));
        assert!(screen.sink().is_empty());
    }

    #[test]
    fn parking_is_below_the_grid() {
        let screen = ScreenBuffer::new(50, 20, Vec::new());
        assert_eq!(screen.parking(), (0, 20));
    }

    #[test]
    fn get_outside_is_none() {
        let screen = ScreenBuffer::new(3, 3, Vec::new());
        assert_eq!(screen.get(3, 0), None);
        assert_eq!(screen.get(0, 3), None);
        assert_eq!(screen.get(2, 2), Some(BLANK));
    }

    #[test]
    fn zero_width_grid_has_empty_rows() {
        let screen = ScreenBuffer::new(0, 2, Vec::new());
        assert_eq!(screen.rows(), vec![String::new(), String::new()]);
    }

    // ── initialize ─────────────────────────────────────────────────

    #[test]
    fn initialize_places_marker_on_background() {
        let mut screen = ScreenBuffer::new(3, 2, Vec::new());
        screen.initialize('.', '@', (2, 1)).unwrap();
        assert_eq!(screen.rows(), vec!["...", "..@"]);
    }

    #[test]
    fn initialize_writes_every_cell_once_then_parks() {
        let mut screen = ScreenBuffer::new(3, 2, Vec::new());
        screen.initialize('.', '@', (0, 0)).unwrap();
        let out = drain(&mut screen);
        assert_eq!(out, "\x1b[2J\x1b[H\x1b[1;1H@..\x1b[2;1H...\x1b[3;1H");
    }

    #[test]
    fn initialize_rejects_player_outside() {
        let mut screen = ScreenBuffer::new(3, 3, Vec::new());
        let err = screen.initialize('.', '@', (3, 0)).unwrap_err();
        assert!(matches!(err, TermError::OutOfBounds { x: 3, y: 0, .. }));
        assert!(screen.sink().is_empty());
    }

    // ── write_cell ─────────────────────────────────────────────────

    #[test]
    fn write_cell_emits_only_that_cell_and_parks() {
        let mut screen = three_by_three();
        screen.write_cell(2, 0, '#').unwrap();
        assert_eq!(drain(&mut screen), "\x1b[1;3H#\x1b[4;1H");
        assert_eq!(screen.get(2, 0), Some('#'));
    }

    #[test]
    fn write_cell_out_of_bounds_fails_and_changes_nothing() {
        let mut screen = three_by_three();
        let before = screen.rows();
        let err = screen.write_cell(0, 3, '#').unwrap_err();
        assert!(matches!(
            err,
            TermError::OutOfBounds {
                x: 0,
                y: 3,
                width: 3,
                height: 3
            }
        ));
        assert_eq!(screen.rows(), before);
        assert!(screen.sink().is_empty());
    }

    // ── sweeps ─────────────────────────────────────────────────────

    #[test]
    fn clear_blanks_everything_but_marker() {
        let mut screen = three_by_three();
        let stats = screen.clear_all_except('@').unwrap();
        assert_eq!(screen.rows(), vec!["   ", " @ ", "   "]);
        assert_eq!(stats.cells_rewritten, 8);
        assert_eq!(stats.cells_skipped, 1);
        assert_eq!(stats.total_cells(), 9);
    }

    #[test]
    fn fill_sets_everything_but_marker() {
        let mut screen = three_by_three();
        screen.fill_all_except('@', '#').unwrap();
        assert_eq!(screen.rows(), vec!["###", "#@#", "###"]);
    }

    #[test]
    fn fill_twice_is_idempotent() {
        let mut screen = three_by_three();
        screen.fill_all_except('@', '#').unwrap();
        let once = screen.rows();
        screen.sink_mut().clear();

        let stats = screen.fill_all_except('@', '#').unwrap();
        assert_eq!(screen.rows(), once);
        assert_eq!(stats.cells_rewritten, 0);
        assert!(screen.sink().is_empty(), "nothing changed, nothing sent");
    }

    #[test]
    fn clear_then_fill_only_changes_content() {
        let mut screen = three_by_three();
        let initial = screen.rows();
        screen.clear_all_except('@').unwrap();
        screen.fill_all_except('@', '.').unwrap();
        assert_eq!(screen.rows(), initial);
        assert_eq!(screen.get(1, 1), Some('@'));
    }

    #[test]
    fn sweep_skips_cursor_moves_for_adjacent_cells() {
        let mut screen = ScreenBuffer::new(3, 1, Vec::new());
        screen.initialize('.', '@', (0, 0)).unwrap();
        screen.sink_mut().clear();
        screen.fill_all_except('@', '#').unwrap();
        // One move to (1,0), two characters, then park.
        assert_eq!(drain(&mut screen), "\x1b[1;2H##\x1b[2;1H");
    }

    #[test]
    fn sweep_repositions_at_row_start() {
        let mut screen = ScreenBuffer::new(2, 2, Vec::new());
        screen.initialize('.', '@', (1, 0)).unwrap();
        screen.sink_mut().clear();
        screen.clear_all_except('@').unwrap();
        assert_eq!(drain(&mut screen), "\x1b[1;1H \x1b[2;1H  \x1b[3;1H");
    }

    // ── status line ────────────────────────────────────────────────

    #[test]
    fn status_writes_on_parking_line_and_leaves_cursor_after_text() {
        let mut screen = three_by_three();
        screen.write_status("Command: ").unwrap();
        assert_eq!(drain(&mut screen), "\x1b[4;1HCommand: \x1b[4;10H");
    }

    #[test]
    fn shorter_status_blanks_the_leftover() {
        let mut screen = three_by_three();
        screen.write_status("abcd").unwrap();
        screen.sink_mut().clear();
        screen.write_status("ab").unwrap();
        assert_eq!(drain(&mut screen), "\x1b[4;1Hab  \x1b[4;3H");
    }

    #[test]
    fn empty_status_clears_line_and_parks() {
        let mut screen = three_by_three();
        screen.write_status("xyz").unwrap();
        screen.sink_mut().clear();
        screen.write_status("").unwrap();
        assert_eq!(drain(&mut screen), "\x1b[4;1H   \x1b[4;1H");
    }

    #[test]
    fn status_does_not_touch_grid() {
        let mut screen = three_by_three();
        let before = screen.rows();
        screen.write_status("Invalid command: bogus").unwrap();
        assert_eq!(screen.rows(), before);
    }
}
