//! Blocking line prompts.
//!
//! A [`Prompter`] prints a prompt without a newline, then reads one line.
//! End of input is `Ok(None)` everywhere, which ends the session.
//!
//! Numbers are read with leading-integer semantics: optional whitespace and
//! sign, then digits, and whatever follows is ignored (`"12abc"` is 12).
//! Input that does not start that way is rejected and the prompt repeats.

use std::io::{BufRead, Write};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, StockError};

fn leading_int() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").ok())
        .as_ref()
}

/// Parse the integer at the start of `input`.
///
/// # Errors
///
/// [`StockError::InvalidNumber`] if `input` does not start with an integer
/// or the integer does not fit in an `i64`.
pub fn parse_leading_int(input: &str) -> Result<i64> {
    leading_int()
        .and_then(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or_else(|| StockError::InvalidNumber(input.to_string()))
}

/// Line-oriented prompt over any reader and writer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// I/O errors from the output.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `prompt` and read one line, without its line ending.
    ///
    /// # Errors
    ///
    /// I/O errors on either side.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!(prompt, "end of input");
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask until the answer starts with an integer.
    ///
    /// Every rejected answer prints the invalid-number message.
    ///
    /// # Errors
    ///
    /// I/O errors on either side.
    pub fn ask_number(&mut self, prompt: &str) -> Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_leading_int(&answer) {
                Ok(n) => return Ok(Some(n)),
                Err(err) => self.say(&err.to_string())?,
            }
        }
    }

    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Direct access for escape sequences and other unprompted output.
    pub const fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
