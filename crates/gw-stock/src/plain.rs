//! The plain numbered menu.
//!
//! ```text
//!     Enter selection:
//!     1 - Add vehicle
//!     2 - Remove vehicle
//!     3 - View inventory (total: 2)
//!     4 - Switch to better UI
//!
//!     0 - Exit
//! ```
//!
//! Removal takes a 0-based index, as printed by the listing.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Result, StockError};
use crate::inventory::{Inventory, Vehicle};
use crate::prompt::Prompter;
use crate::session::Step;

pub const SELECTION_PROMPT: &str = "Enter menu selection: ";

/// The menu block printed before every selection.
#[must_use]
pub fn menu_text(total: usize) -> String {
    format!(
        "
    Enter selection:
    1 - Add vehicle
    2 - Remove vehicle
    3 - View inventory (total: {total})
    4 - Switch to better UI

    0 - Exit
    "
    )
}

/// Show the menu, read one selection and carry it out.
///
/// # Errors
///
/// I/O errors from the prompter.
pub fn step<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    inventory: &mut Inventory,
) -> Result<Step> {
    prompter.say(&menu_text(inventory.len()))?;
    let Some(selection) = prompter.ask_number(SELECTION_PROMPT)? else {
        return Ok(Step::Quit);
    };
    debug!(selection, "plain menu selection");

    match selection {
        0 => Ok(Step::Quit),
        1 => add_vehicle(prompter, inventory),
        2 => remove_vehicle(prompter, inventory),
        3 => {
            for line in inventory.listing() {
                prompter.say(&line)?;
            }
            Ok(Step::Continue)
        }
        4 => Ok(Step::SwitchUi),
        _ => Ok(Step::Continue),
    }
}

fn add_vehicle<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    inventory: &mut Inventory,
) -> Result<Step> {
    let Some(make) = prompter.ask("Enter the make: ")? else {
        return Ok(Step::Quit);
    };
    let Some(model) = prompter.ask("Enter the model: ")? else {
        return Ok(Step::Quit);
    };
    let Some(year) = prompter.ask_number("Enter the year: ")? else {
        return Ok(Step::Quit);
    };
    inventory.add(Vehicle::new(make, model, year));
    Ok(Step::Continue)
}

fn remove_vehicle<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    inventory: &mut Inventory,
) -> Result<Step> {
    let Some(index) = prompter.ask_number("Enter the index of the vehicle to remove: ")? else {
        return Ok(Step::Quit);
    };
    match inventory.remove(index) {
        Ok(_) => {}
        Err(err @ StockError::IndexOutOfRange { .. }) => prompter.say(&err.to_string())?,
        Err(err) => return Err(err),
    }
    Ok(Step::Continue)
}
