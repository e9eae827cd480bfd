// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), and isatty. These are the standard POSIX
// interfaces for terminal control — there is no safe alternative. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// Entering puts stdin into raw mode (every keypress delivered immediately,
// nothing echoed) and clears the screen. Leaving clears the screen again,
// shows the cursor and puts the original termios back. Leaving happens on
// drop too, and a panic hook restores cooked mode before the panic message
// prints, so a crash never strands the shell without echo.
//
// Raw mode is the whole input model. If stdin is not a terminal, `enter`
// fails with `TermError::NotATty` rather than pretending to work.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use tracing::{debug, info, warn};

use crate::ansi;
use crate::error::{Result, TermError};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Whether a `width × height` region fits inside this size.
    #[inline]
    #[must_use]
    pub const fn fits(self, width: u16, height: u16) -> bool {
        width <= self.cols && height <= self.rows
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`Terminal`] struct owns its own copy, but the panic hook can't
/// access it.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Restore sequence for emergency use: show cursor, then move below
/// whatever was drawn so the panic message starts on a fresh line.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[?25h\r\n";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            restore_termios_from_backup();

            let mut stderr = io::stderr();
            let _ = stderr.write_all(EMERGENCY_RESTORE);
            let _ = stderr.flush();

            original(info);
        }));
    });
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// Call [`enter`](Self::enter) to switch stdin to raw mode and clear the
/// screen. The terminal is restored when the handle is dropped.
///
/// # Example
///
/// ```no_run
/// use gw_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... draw the grid, read keys ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), gw_term::TermError>(())
/// ```
pub struct Terminal {
    /// Original termios saved before entering raw mode.
    #[cfg(unix)]
    original_termios: Option<libc::termios>,

    /// Whether raw mode is active.
    active: bool,
}

impl Terminal {
    /// Create a terminal handle. Does **not** enter raw mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            #[cfg(unix)]
            original_termios: None,
            active: false,
        }
    }

    /// Whether raw mode is currently active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter raw mode and clear the screen.
    ///
    /// Idempotent: calling `enter()` while already active is a no-op.
    ///
    /// # Errors
    ///
    /// [`TermError::NotATty`] if stdin is not a terminal,
    /// [`TermError::RawMode`] if termios refuses the change, or an I/O
    /// error writing the clear sequence.
    pub fn enter(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        if !is_tty() {
            return Err(TermError::NotATty);
        }

        install_panic_hook();
        self.enable_raw_mode().map_err(TermError::RawMode)?;
        self.active = true;

        let mut stdout = io::stdout().lock();
        ansi::clear_screen(&mut stdout)?;
        stdout.flush()?;

        info!("terminal entered raw mode");
        Ok(())
    }

    /// Clear the screen, show the cursor and restore cooked mode.
    ///
    /// Idempotent: calling `leave()` while inactive is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> Result<()> {
        self.leave_via(&mut io::stdout().lock())
    }

    /// [`leave`](Self::leave) with the restore sequences going to `out`.
    ///
    /// Cooked mode comes back even when `out` fails; the output error is
    /// reported only after termios is restored.
    fn leave_via(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        let written = ansi::clear_screen(out)
            .and_then(|()| ansi::cursor_show(out))
            .and_then(|()| out.flush());

        let restored = self.disable_raw_mode();
        self.active = false;

        match (restored, written) {
            (Err(e), _) => Err(TermError::RawMode(e)),
            (Ok(()), Err(e)) => {
                warn!(error = %e, "terminal restored but the restore sequence was not written");
                Err(e.into())
            }
            (Ok(()), Ok(())) => {
                info!("terminal restored to cooked mode");
                Ok(())
            }
        }
    }

    // ── Raw Mode (termios) ──────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            // cfmakeraw equivalent, but keep OPOST so "\n" in messages
            // printed after leave() still returns the carriage.
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            // VMIN=1, VTIME=0: read() returns as soon as one byte arrives.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        debug!("termios switched to raw");
        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "raw mode requires a unix terminal",
        ))
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            use std::os::unix::io::AsRawFd;
            let fd = io::stdin().as_raw_fd();

            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Size ──────────────────────────────────────────────────────────

    #[test]
    fn size_fits() {
        let term = Size { cols: 80, rows: 24 };
        assert!(term.fits(50, 20));
        assert!(term.fits(80, 24));
        assert!(!term.fits(81, 24));
        assert!(!term.fits(50, 25));
    }

    // ── Terminal queries ─────────────────────────────────────────────

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    #[test]
    fn emergency_restore_shows_cursor() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains("\x1b[?25h"));
    }

    // ── Terminal struct ─────────────────────────────────────────────

    #[test]
    fn terminal_new_is_inactive() {
        let term = Terminal::new();
        assert!(!term.is_active());
    }

    #[test]
    fn enter_without_tty_fails_loudly() {
        if is_tty() {
            return;
        }
        let mut term = Terminal::new();
        let err = term.enter().unwrap_err();
        assert!(matches!(err, TermError::NotATty));
        assert!(!term.is_active());
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let mut term = Terminal::new();
        term.leave().unwrap();
        assert!(!term.is_active());
    }

    #[test]
    fn drop_without_enter() {
        let term = Terminal::new();
        drop(term);
    }

    /// A stdout that refuses every byte, like `/dev/full`.
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn leave_restores_mode_even_when_output_fails() {
        let mut term = Terminal::new();
        term.active = true;

        let err = term.leave_via(&mut FullDevice).unwrap_err();
        assert!(matches!(err, TermError::Io(_)));
        assert!(!term.is_active());

        // Already restored: a second leave (or the drop) has nothing to do.
        term.leave_via(&mut FullDevice).unwrap();
    }

    #[test]
    fn leave_writes_clear_and_show_cursor() {
        let mut term = Terminal::new();
        term.active = true;

        let mut out = Vec::new();
        term.leave_via(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[H\x1b[?25h");
        assert!(!term.is_active());
    }
}
