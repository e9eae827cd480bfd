// SPDX-License-Identifier: MIT
//
// `gridwalk keys` — print every raw keystroke as it arrives.
//
// One line per key that survived coalescing, so holding a key down at a
// repeat rate above the tick rate prints fewer lines than presses. `q`
// quits.

use std::io::Write;

use gw_term::event_loop::{Action, App};
use gw_term::keyslot::Keystroke;
use gw_term::Result;
use tracing::debug;

pub const QUIT_KEY: char = 'q';

pub struct Echo<W: Write> {
    out: W,
    seen: usize,
}

impl<W: Write> Echo<W> {
    pub const fn new(out: W) -> Self {
        Self { out, seen: 0 }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> App for Echo<W> {
    fn on_start(&mut self) -> Result<()> {
        writeln!(self.out, "press any key ({QUIT_KEY} quits)")?;
        self.out.flush()?;
        Ok(())
    }

    fn on_key(&mut self, key: Keystroke) -> Result<Action> {
        if key == Keystroke::from(QUIT_KEY) {
            debug!(keys = self.seen, "echo finished");
            return Ok(Action::Quit);
        }
        self.seen += 1;
        writeln!(self.out, "you pressed: {key}")?;
        self.out.flush()?;
        Ok(Action::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_term::event_loop::{EventLoop, Exit};
    use gw_term::keyslot::KeySlot;
    use gw_term::tick::ManualTicker;
    use pretty_assertions::assert_eq;

    #[test]
    fn echoes_until_quit() {
        let mut echo = Echo::new(Vec::new());
        echo.on_start().unwrap();
        let slot = KeySlot::new();
        for key in [Keystroke::from('x'), Keystroke::SUBMIT, Keystroke::from('q')] {
            slot.store(key);
            let exit = EventLoop::drive(&mut echo, &slot, &mut ManualTicker::new(1)).unwrap();
            if exit == Exit::Quit {
                break;
            }
        }
        let out = String::from_utf8(echo.into_inner()).unwrap();
        assert_eq!(
            out,
            "press any key (q quits)\nyou pressed: x\nyou pressed: <Enter>\n"
        );
    }
}
