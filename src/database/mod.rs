//! This module acts as a central hub for all database-related logic.
//! It declares the specialized submodules so they can be accessed from
//! elsewhere in the application via their full path, e.g., `database::players::lock_player`.

pub mod ascension;
pub mod exploration;
pub mod game_config;
pub mod guilds;
pub mod health;
pub mod init;
pub mod leaderboard;
pub mod ledger;
pub mod maidens;
pub mod models;
pub mod players;
pub mod retry;
pub mod shrines;

pub use init::{Database, DbPool, DbTx};
