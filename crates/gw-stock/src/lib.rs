//! # gw-stock — console vehicle inventory for gridwalk
//!
//! A line-prompted inventory manager with two interchangeable menus:
//!
//! - **[`plain`]** — a numbered text menu, 0-based removal
//! - **[`bordered`]** — a framed 20-line screen with ASCII banners
//!
//! Supporting modules:
//!
//! - **[`inventory`]** — `Vehicle` and the ordered `Inventory`
//! - **[`prompt`]** — line prompts with the numeric re-prompt loop
//! - **[`session`]** — runs either menu until quit or end of input
//! - **[`banner`]** — the banner art

pub mod banner;
pub mod bordered;
pub mod error;
pub mod inventory;
pub mod plain;
pub mod prompt;
pub mod session;

pub use error::{Result, StockError};
