//! A full inventory session: menus until quit or end of input, then the
//! final inventory listing.

use std::io::{BufRead, Write};

use gw_term::ansi;
use tracing::info;

use crate::bordered::BorderedMenu;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::plain;
use crate::prompt::Prompter;

/// What a menu step asks the session to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Toggle between the plain and bordered menus.
    SwitchUi,
    Quit,
}

/// Which menu is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiStyle {
    #[default]
    Plain,
    Bordered,
}

impl UiStyle {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Plain => Self::Bordered,
            Self::Bordered => Self::Plain,
        }
    }
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    inventory: Inventory,
    style: UiStyle,
    bordered: BorderedMenu,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, style: UiStyle) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            inventory: Inventory::new(),
            style,
            bordered: BorderedMenu::new(),
        }
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn style(&self) -> UiStyle {
        self.style
    }

    /// Run menus until the user quits or input ends, then print the
    /// inventory.
    ///
    /// # Errors
    ///
    /// I/O errors on either side.
    pub fn run(&mut self) -> Result<()> {
        info!(style = ?self.style, "inventory session started");
        loop {
            let step = match self.style {
                UiStyle::Plain => plain::step(&mut self.prompter, &mut self.inventory)?,
                UiStyle::Bordered => {
                    ansi::clear_screen(self.prompter.output_mut())?;
                    let frame = self.bordered.frame(&self.inventory);
                    self.prompter.say(frame.render().trim_end_matches('\n'))?;
                    self.bordered.step(&mut self.prompter, &mut self.inventory)?
                }
            };
            match step {
                Step::Continue => {}
                Step::SwitchUi => {
                    self.style = self.style.toggled();
                    info!(style = ?self.style, "menu switched");
                }
                Step::Quit => break,
            }
        }

        self.print_inventory()?;
        info!(vehicles = self.inventory.len(), "inventory session finished");
        Ok(())
    }

    fn print_inventory(&mut self) -> Result<()> {
        self.prompter.say("")?;
        if self.inventory.is_empty() {
            return self.prompter.say("Inventory is empty.");
        }
        self.prompter.say("Inventory:")?;
        for line in self.inventory.listing() {
            self.prompter.say(&line)?;
        }
        Ok(())
    }

    /// Consume the session and return its output.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn run(input: &str, style: UiStyle) -> (Inventory, String) {
        let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), style);
        session.run().unwrap();
        let inventory = session.inventory().clone();
        (inventory, String::from_utf8(session.into_output()).unwrap())
    }

    #[test]
    fn plain_session_prints_inventory_on_exit() {
        let (inv, out) = run("1\nToyota\nCorolla\n2004\n0\n", UiStyle::Plain);
        assert_eq!(inv.len(), 1);
        assert!(out.ends_with("\nInventory:\n0) Toyota Corolla 2004\n"));
    }

    #[test]
    fn eof_ends_the_session() {
        let (inv, out) = run("1\nFord\n", UiStyle::Plain);
        assert!(inv.is_empty());
        assert!(out.ends_with("Inventory is empty.\n"));
    }

    #[test]
    fn switching_to_bordered_and_back() {
        let (inv, out) = run("4\n1\nHonda\nCivic\n2019\n1\n4\n3\n0\n", UiStyle::Plain);
        assert_eq!(inv.listing(), vec!["0) Honda Civic 2019"]);
        assert!(out.contains("\x1b[2J\x1b[H"));
        assert!(out.contains("'--->>> Enter menu selection: "));
        assert!(out.contains("0) Honda Civic 2019\n"));
    }

    #[test]
    fn bordered_session_clears_before_every_frame() {
        let (_, out) = run("3\n0\n0\n", UiStyle::Bordered);
        assert_eq!(out.matches("\x1b[2J\x1b[H").count(), 3);
    }

    #[test]
    fn style_toggles() {
        assert_eq!(UiStyle::Plain.toggled(), UiStyle::Bordered);
        assert_eq!(UiStyle::Bordered.toggled(), UiStyle::Plain);
        assert_eq!(UiStyle::default(), UiStyle::Plain);
    }
}
