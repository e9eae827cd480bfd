// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background stdin reader — turns raw bytes into the pending keystroke.
//
// A dedicated thread reads stdin and, for every chunk the terminal hands
// over, stores the last keystroke of that chunk in the shared `KeySlot`.
// It never queues: a new chunk overwrites whatever the loop has not taken.
//
// Escape sequences (arrow keys, function keys, Alt chords) are not part of
// the key set this program reacts to. They are cut out of the chunk
// wherever they sit, so an arrow key typed right after `d` leaves `d`
// pending instead of leaking the sequence's final letter. An ESC byte
// that ends the chunk is the Escape key.
//
// Shutdown: the reader thread uses `poll()` with a short timeout on
// stdin's file descriptor, checking an `AtomicBool` stop flag between
// polls. This lets us shut down cleanly without leaving the thread
// stuck in a blocking `read()`.

#[cfg(unix)]
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace};

use crate::keyslot::{KeySlot, Keystroke};

/// Bytes read from stdin per `read()` call.
///
/// A single keypress is 1-6 bytes; a paste can be more. Anything beyond
/// the last keystroke of a chunk is discarded anyway.
const READ_BUF_SIZE: usize = 1024;

/// How often the reader thread checks the stop flag (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

const ESC: u8 = 0x1b;

/// Decode one raw chunk into the keystroke it leaves pending.
///
/// Returns the last code point outside any escape sequence, or `None` if
/// the chunk holds nothing else. Invalid UTF-8 decodes lossily.
#[must_use]
pub fn last_keystroke(chunk: &[u8]) -> Option<Keystroke> {
    let keys = strip_escape_sequences(chunk);
    String::from_utf8_lossy(&keys)
        .chars()
        .next_back()
        .map(Keystroke::from)
}

/// The chunk with every ESC-introduced sequence removed.
///
/// `ESC [` starts a CSI sequence (parameter bytes, then one final byte),
/// `ESC O` an SS3 sequence (one more byte), and ESC before anything else
/// an Alt chord. A trailing ESC is kept.
fn strip_escape_sequences(chunk: &[u8]) -> Vec<u8> {
    let mut keys = Vec::with_capacity(chunk.len());
    let mut i = 0;
    while i < chunk.len() {
        match &chunk[i..] {
            [ESC, b'[', params @ ..] => {
                let params = params.iter().take_while(|b| (0x20..=0x3f).contains(*b)).count();
                i += 2 + params + 1;
            }
            [ESC, b'O', ..] => i += 3,
            [ESC, _, ..] => i += 2,
            [b, ..] => {
                keys.push(*b);
                i += 1;
            }
            [] => break,
        }
    }
    keys
}

/// Background stdin reader thread.
///
/// Spawns a thread that reads raw bytes from stdin and stores the most
/// recent keystroke in a [`KeySlot`]. The thread runs until
/// [`stop`](Self::stop) is called (or the `StdinReader` is dropped), or
/// stdin reaches EOF.
///
/// # Example
///
/// ```no_run
/// use gw_term::keyslot::KeySlot;
/// use gw_term::reader::StdinReader;
///
/// let slot = KeySlot::new();
/// let reader = StdinReader::spawn(slot.clone())?;
///
/// if let Some(key) = slot.take() {
///     println!("got {key}");
/// }
/// drop(reader); // stops the thread
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct StdinReader {
    /// The reader thread handle. `None` after `stop()` joins it.
    handle: Option<JoinHandle<()>>,
    /// Shared flag to signal the thread to exit.
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Spawn the background reader thread feeding `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS cannot spawn a new thread.
    pub fn spawn(slot: KeySlot) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                Self::reader_loop(&slot, &stop_flag);
                debug!("stdin reader exited");
            })?;

        Ok(Self {
            handle: Some(handle),
            stop,
        })
    }

    /// Signal the reader thread to stop and wait for it to exit.
    ///
    /// Idempotent: calling `stop()` after the thread has already
    /// exited is a no-op.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Deliver one chunk to the slot.
    fn deliver(slot: &KeySlot, chunk: &[u8]) {
        match last_keystroke(chunk) {
            Some(key) => {
                trace!(%key, bytes = chunk.len(), "keystroke captured");
                slot.store(key);
            }
            None => trace!(bytes = chunk.len(), "escape sequence dropped"),
        }
    }

    /// The reader thread's main loop.
    ///
    /// Polls stdin with a short timeout, reads available bytes, and
    /// stores the resulting keystroke. Exits when the stop flag is set
    /// or stdin reaches EOF.
    #[cfg(unix)]
    fn reader_loop(slot: &KeySlot, stop: &AtomicBool) {
        use std::os::unix::io::AsRawFd;

        let stdin_fd = io::stdin().as_raw_fd();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            // Poll stdin for readability with a timeout.
            let ready = unsafe {
                let mut pfd = libc::pollfd {
                    fd: stdin_fd,
                    events: libc::POLLIN,
                    revents: 0,
                };
                libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
            };

            // Timeout or error: loop back to check stop flag.
            if ready <= 0 {
                continue;
            }

            let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };

            if n <= 0 {
                // EOF or error — exit the thread.
                break;
            }

            #[allow(clippy::cast_sign_loss)] // n > 0 guaranteed above.
            Self::deliver(slot, &buf[..n as usize]);
        }
    }

    /// Non-unix fallback using blocking reads with no poll.
    #[cfg(not(unix))]
    fn reader_loop(slot: &KeySlot, stop: &AtomicBool) {
        use std::io::Read;

        let stdin = std::io::stdin();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            match stdin.lock().read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => Self::deliver(slot, &buf[..n]),
            }
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
