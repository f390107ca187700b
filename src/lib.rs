//! Holocron
//!
//! TUI application for browsing the Star Wars API character catalog.
//!
//! Pure Core / Impure Shell: `model` and `state` hold data and transitions
//! with no I/O; `api`, `view`, `config` and `logging` talk to the network,
//! the terminal and the filesystem.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
