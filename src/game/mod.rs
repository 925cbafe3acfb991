//! Game-balance rules expressed as pure functions over config sections.
//! Nothing in here touches the database; services feed rows in and persist the results.

pub mod combat;
pub mod daily;
pub mod exploration;
pub mod fusion;
pub mod gacha;
pub mod guild;
pub mod leveling;
pub mod power;
pub mod resources;
pub mod shrine;
