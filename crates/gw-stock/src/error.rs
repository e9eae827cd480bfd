//! Inventory errors.
//!
//! Only `Io` ends a session. `InvalidNumber` is handled inside the prompt
//! loop and `IndexOutOfRange` is shown to the user.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    /// The input does not start with an integer.
    #[error("Error: The input provided was not a number, try again.")]
    InvalidNumber(String),

    /// A removal addressed a vehicle that does not exist.
    #[error("Invalid index, no cars were removed")]
    IndexOutOfRange { index: i64, len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StockError>;
