//! Core gallery logic: catalog, filtering, pool expansion, visibility
//! tracking and lazy asset loading.
//!
//! Nothing in this module depends on any TUI or rendering crate, nor on the
//! network; side effects leave through traits and returned effects.

pub mod assets;
pub mod catalog;
pub mod expand;
pub mod filter;
pub mod growth;
pub mod header;
pub mod proximity;
pub mod session;
pub mod vibe;
