// journal: a terminal client for a student's schedule and profile.
// Offline-first: cached responses are shown immediately and refreshed in the background.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod revalidate;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{JournalError, Result};
