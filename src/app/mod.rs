//! Application orchestration: the state machine around the gallery session
//! and the plumbing that feeds it events.

pub mod event;
pub mod handler;
pub mod runtime;
pub mod settings;
pub mod state;
pub mod visibility;
