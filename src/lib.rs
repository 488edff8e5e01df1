// Public API for the binary and integration tests

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod handlers;
pub mod protocol;
pub mod setup;
pub mod state;
pub mod types;
