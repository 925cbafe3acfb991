// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod game;
pub mod handler;
pub mod interactions;
pub mod model;
pub mod services;
pub mod settings;
pub mod ui;

pub use error::{RpgError, RpgResult};
pub use model::AppState;
