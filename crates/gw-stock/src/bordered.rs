//! The bordered menu: a fixed 20-line frame with an ASCII banner.
//!
//! Every screen starts from the same blank frame (banner on rows 0-5, empty
//! framed rows below) and text is spliced over it in place. Splicing
//! overwrites characters; it never shifts the rest of the line.
//!
//! ```text
//! row  0-5   banner for the current screen
//! row  7     first display row (form fields, table header)
//! row  8-15  table rows
//! row 13-17  options, last one on row 17
//! ```

use std::io::{BufRead, Write};

use tracing::debug;

use crate::banner;
use crate::error::Result;
use crate::inventory::{Inventory, Vehicle};
use crate::prompt::Prompter;
use crate::session::Step;

/// Frame width in columns, borders included.
pub const WIDTH: usize = 126;
/// Frame height in lines.
pub const LINES: usize = 20;

/// Marks the row waiting for input; spliced at column 0 over the border.
pub const CURSOR: &str = "'--->>> ";
pub const CLOSING_CURSOR: &str = " <<<---";

const DISPLAY_ROW: usize = 7;
const OPTIONS_ROW: usize = 17;
const TEXT_COL: usize = 8;
const TABLE_COL: usize = 20;
/// Table rows fit between the header and the options.
const MAX_TABLE_ROWS: usize = OPTIONS_ROW - 1 - (DISPLAY_ROW + 1);

const TABLE_HEADER: &str = "| Number | Make        | Model        | Year |";
const TABLE_ROW: &str = "|        |             |              |      |";

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Overwrite `base` with `text` starting at character `col`.
///
/// Text running past the end of `base` extends it.
#[must_use]
pub fn splice(base: &str, col: usize, text: &str) -> String {
    let head: String = base.chars().take(col).collect();
    let tail: String = base.chars().skip(col + text.chars().count()).collect();
    format!("{head}{text}{tail}")
}

/// The lines of one rendered screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// The banner for `screen` over an otherwise blank frame.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        let blank = format!("|{}|", " ".repeat(WIDTH - 2));
        let mut lines: Vec<String> = screen.banner().iter().map(|&l| l.to_string()).collect();
        lines.resize(LINES, blank);
        Self { lines }
    }

    /// Splice `text` into row `row` at column `col`. Rows past the frame
    /// are ignored.
    pub fn splice(&mut self, row: usize, col: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            *line = splice(line, col, text);
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Which bordered screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    AddVehicle,
    RemoveVehicle,
    ViewInventory,
}

impl Screen {
    #[must_use]
    pub const fn banner(self) -> &'static [&'static str; banner::HEIGHT] {
        match self {
            Self::Main => &banner::MAIN,
            Self::AddVehicle => &banner::ADD_VEHICLE,
            Self::RemoveVehicle => &banner::REMOVE_VEHICLE,
            Self::ViewInventory => &banner::VIEW_INVENTORY,
        }
    }
}

/// The vehicle being entered on the add screen, one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Draft {
    make: Option<String>,
    model: Option<String>,
    year: Option<i64>,
}

impl Draft {
    fn complete(&self) -> Option<Vehicle> {
        match (&self.make, &self.model, self.year) {
            (Some(make), Some(model), Some(year)) => Some(Vehicle::new(make, model, year)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// BorderedMenu
// ---------------------------------------------------------------------------

/// State of the bordered UI between steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderedMenu {
    screen: Screen,
    draft: Draft,
}

impl BorderedMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// The frame for the current screen.
    #[must_use]
    pub fn frame(&self, inventory: &Inventory) -> Frame {
        let mut frame = Frame::new(self.screen);
        match self.screen {
            Screen::Main => {
                let options = [
                    "4 - Switch to plain UI".to_string(),
                    format!("3 - View inventory (total: {})", inventory.len()),
                    "2 - Remove vehicle".to_string(),
                    "1 - Add vehicle".to_string(),
                    "0 - Quit".to_string(),
                ];
                let first = OPTIONS_ROW + 1 - options.len();
                for (row, text) in (first..).zip(&options) {
                    frame.splice(row, TEXT_COL, text);
                }
            }
            Screen::AddVehicle => self.draw_draft(&mut frame),
            Screen::RemoveVehicle => {
                draw_table(&mut frame, inventory);
                let hint = match inventory.len() {
                    0 => "1 - No vehicles to remove".to_string(),
                    1 => "1 - Remove this vehicle".to_string(),
                    n => format!("1-{n} Remove vehicle"),
                };
                frame.splice(OPTIONS_ROW - 1, TEXT_COL, &hint);
                frame.splice(OPTIONS_ROW, TEXT_COL, "0 - Quit to Main Menu");
            }
            Screen::ViewInventory => {
                draw_table(&mut frame, inventory);
                frame.splice(OPTIONS_ROW, TEXT_COL, "0 - Quit to Main Menu");
            }
        }
        frame
    }

    fn draw_draft(&self, frame: &mut Frame) {
        let year = self.draft.year.map(|y| y.to_string());
        let fields = [
            ("Make ", self.draft.make.as_deref()),
            ("Model", self.draft.model.as_deref()),
            ("Year ", year.as_deref()),
        ];

        let mut awaiting = None;
        for (i, (label, value)) in fields.into_iter().enumerate() {
            let row = DISPLAY_ROW + i;
            match value {
                Some(value) => frame.splice(row, TEXT_COL, &format!("[X] {label} - {value}")),
                None if awaiting.is_none() => {
                    awaiting = Some(row);
                    frame.splice(row, 0, CURSOR);
                    frame.splice(row, TEXT_COL, &format!("[ ] {label} - {CLOSING_CURSOR}"));
                }
                None => frame.splice(row, TEXT_COL, &format!("[ ] {label} -")),
            }
        }

        if awaiting.is_none() {
            frame.splice(OPTIONS_ROW - 1, TEXT_COL, "1 - Confirm");
            frame.splice(OPTIONS_ROW, TEXT_COL, "0 - Quit to Main Menu");
        }
    }

    /// Read one answer for the current screen and apply it.
    ///
    /// # Errors
    ///
    /// I/O errors from the prompter.
    pub fn step<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        inventory: &mut Inventory,
    ) -> Result<Step> {
        let selection_prompt = format!("{CURSOR}Enter menu selection: ");
        match self.screen {
            Screen::Main => {
                let Some(selection) = prompter.ask_number(&selection_prompt)? else {
                    return Ok(Step::Quit);
                };
                match selection {
                    0 => return Ok(Step::Quit),
                    1 => self.go(Screen::AddVehicle),
                    2 => self.go(Screen::RemoveVehicle),
                    3 => self.go(Screen::ViewInventory),
                    4 => return Ok(Step::SwitchUi),
                    _ => {}
                }
            }
            Screen::AddVehicle => return self.step_add(prompter, inventory, &selection_prompt),
            Screen::RemoveVehicle => {
                let prompt = format!("{CURSOR}Enter the number to remove: ");
                let Some(number) = prompter.ask_number(&prompt)? else {
                    return Ok(Step::Quit);
                };
                if number == 0 {
                    self.go(Screen::Main);
                } else if usize::try_from(number).is_ok_and(|n| (1..=inventory.len()).contains(&n)) {
                    inventory.remove(number - 1)?;
                }
            }
            Screen::ViewInventory => {
                let Some(selection) = prompter.ask_number(&selection_prompt)? else {
                    return Ok(Step::Quit);
                };
                if selection == 0 {
                    self.go(Screen::Main);
                }
            }
        }
        Ok(Step::Continue)
    }

    fn step_add<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        inventory: &mut Inventory,
        selection_prompt: &str,
    ) -> Result<Step> {
        let answered = if self.draft.make.is_none() {
            prompter.ask("Enter the make: ")?.map(|make| self.draft.make = Some(make))
        } else if self.draft.model.is_none() {
            prompter.ask("Enter the model: ")?.map(|model| self.draft.model = Some(model))
        } else if self.draft.year.is_none() {
            prompter.ask_number("Enter the year: ")?.map(|year| self.draft.year = Some(year))
        } else {
            prompter.ask_number(selection_prompt)?.map(|selection| match selection {
                0 => self.go(Screen::Main),
                1 => {
                    if let Some(vehicle) = self.draft.complete() {
                        inventory.add(vehicle);
                    }
                    self.go(Screen::Main);
                }
                _ => {}
            })
        };
        Ok(answered.map_or(Step::Quit, |()| Step::Continue))
    }

    fn go(&mut self, screen: Screen) {
        debug!(from = ?self.screen, to = ?screen, "bordered screen change");
        if screen == Screen::Main {
            self.draft = Draft::default();
        }
        self.screen = screen;
    }
}

/// The inventory table: header on the display row, one row per vehicle.
fn draw_table(frame: &mut Frame, inventory: &Inventory) {
    frame.splice(DISPLAY_ROW, TABLE_COL, TABLE_HEADER);
    for (i, vehicle) in inventory.iter().take(MAX_TABLE_ROWS).enumerate() {
        let row = DISPLAY_ROW + 1 + i;
        frame.splice(row, TABLE_COL, TABLE_ROW);
        frame.splice(row, TABLE_COL + 2, &(i + 1).to_string());
        frame.splice(row, TABLE_COL + 11, &vehicle.make);
        frame.splice(row, TABLE_COL + 25, &vehicle.model);
        frame.splice(row, TABLE_COL + 40, &vehicle.year.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

    fn prompter(input: &str) -> TestPrompter {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(Vehicle::new("Toyota", "Corolla", 2004));
        inv.add(Vehicle::new("Ford", "Focus", 2012));
        inv
    }

    #[test]
    fn splice_overwrites_in_place() {
        assert_eq!(splice("|      |", 2, "ab"), "| ab   |");
        assert_eq!(splice("|      |", 0, "xy"), "xy     |");
        assert_eq!(splice("|  |", 3, "long"), "|  long");
    }

    #[test]
    fn every_frame_is_twenty_full_width_lines() {
        let inv = sample();
        for screen in [
            Screen::Main,
            Screen::AddVehicle,
            Screen::RemoveVehicle,
            Screen::ViewInventory,
        ] {
            let menu = BorderedMenu { screen, ..BorderedMenu::new() };
            let frame = menu.frame(&inv);
            assert_eq!(frame.lines().len(), LINES);
            for line in frame.lines() {
                assert_eq!(line.chars().count(), WIDTH, "{line}");
            }
            for (line, art) in frame.lines().iter().zip(screen.banner()) {
                assert_eq!(line.as_str(), *art);
            }
        }
    }

    #[test]
    fn main_screen_options_end_on_the_options_row() {
        let frame = BorderedMenu::new().frame(&sample());
        assert!(frame.lines()[OPTIONS_ROW].starts_with("|       0 - Quit "));
        assert!(frame.lines()[14].contains("3 - View inventory (total: 2)"));
    }

    #[test]
    fn add_screen_points_at_next_field() {
        let mut menu = BorderedMenu {
            screen: Screen::AddVehicle,
            ..BorderedMenu::new()
        };
        let frame = menu.frame(&Inventory::new());
        assert!(frame.lines()[7].starts_with("'--->>> [ ] Make  -  <<<---"));
        assert!(frame.lines()[8].starts_with("|       [ ] Model -"));

        menu.draft.make = Some("Toyota".into());
        let frame = menu.frame(&Inventory::new());
        assert!(frame.lines()[7].starts_with("|       [X] Make  - Toyota"));
        assert!(frame.lines()[8].starts_with("'--->>> [ ] Model -  <<<---"));
    }

    #[test]
    fn table_has_header_and_one_based_rows() {
        let menu = BorderedMenu {
            screen: Screen::ViewInventory,
            ..BorderedMenu::new()
        };
        let frame = menu.frame(&sample());
        assert_eq!(&frame.lines()[7][20..20 + TABLE_HEADER.len()], TABLE_HEADER);
        assert_eq!(
            &frame.lines()[8][20..20 + TABLE_ROW.len()],
            "| 1      | Toyota      | Corolla      | 2004 |"
        );
        assert_eq!(
            &frame.lines()[9][20..20 + TABLE_ROW.len()],
            "| 2      | Ford        | Focus        | 2012 |"
        );
    }

    #[test]
    fn long_table_stops_before_the_options() {
        let mut inv = Inventory::new();
        for i in 0..12 {
            inv.add(Vehicle::new("M", "m", i));
        }
        let menu = BorderedMenu {
            screen: Screen::RemoveVehicle,
            ..BorderedMenu::new()
        };
        let frame = menu.frame(&inv);
        assert!(frame.lines()[OPTIONS_ROW - 1].contains("1-12 Remove vehicle"));
        assert!(frame.lines()[15].contains("| 8 "));
    }

    #[test]
    fn add_flow_confirms_into_inventory() {
        let mut menu = BorderedMenu::new();
        let mut inv = Inventory::new();
        let mut p = prompter("1\nHonda\nCivic\nnope\n2019\n1\n");
        for _ in 0..5 {
            assert_eq!(menu.step(&mut p, &mut inv).unwrap(), Step::Continue);
        }
        assert_eq!(inv.listing(), vec!["0) Honda Civic 2019"]);
        assert_eq!(menu.screen(), Screen::Main);
        assert_eq!(menu.draft, Draft::default());
    }

    #[test]
    fn add_flow_back_discards_draft() {
        let mut menu = BorderedMenu::new();
        let mut inv = Inventory::new();
        let mut p = prompter("1\nHonda\nCivic\n2019\n0\n");
        for _ in 0..5 {
            menu.step(&mut p, &mut inv).unwrap();
        }
        assert!(inv.is_empty());
        assert_eq!(menu.screen(), Screen::Main);
    }

    #[test]
    fn remove_is_one_based_and_ignores_out_of_range() {
        let mut menu = BorderedMenu::new();
        let mut inv = sample();
        let mut p = prompter("2\n7\n-1\n1\n0\n");
        for _ in 0..5 {
            menu.step(&mut p, &mut inv).unwrap();
        }
        assert_eq!(inv.listing(), vec!["0) Ford Focus 2012"]);
        assert_eq!(menu.screen(), Screen::Main);
    }

    #[test]
    fn main_selections() {
        let mut inv = Inventory::new();
        assert_eq!(BorderedMenu::new().step(&mut prompter("0\n"), &mut inv).unwrap(), Step::Quit);
        assert_eq!(
            BorderedMenu::new().step(&mut prompter("4\n"), &mut inv).unwrap(),
            Step::SwitchUi
        );
        assert_eq!(BorderedMenu::new().step(&mut prompter(""), &mut inv).unwrap(), Step::Quit);

        let mut menu = BorderedMenu::new();
        menu.step(&mut prompter("3\n"), &mut inv).unwrap();
        assert_eq!(menu.screen(), Screen::ViewInventory);
        menu.step(&mut prompter("0\n"), &mut inv).unwrap();
        assert_eq!(menu.screen(), Screen::Main);
    }
}
