//! Service modules for extracted functionality.
//!
//! Logic that operates on slides without needing the `App` or a terminal.

pub mod editor;
