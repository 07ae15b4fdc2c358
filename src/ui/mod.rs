//! Rendering layer.  Everything that touches Ratatui widgets lives here.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No network I/O happens here.

pub mod gallery;
pub mod glyphs;
pub mod header;
pub mod layout;
pub mod popup;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;
