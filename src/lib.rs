//! Quest Chronicles - turn-based terminal RPG library
//!
//! Game logic lives here so it can be driven headlessly by tests; the binary
//! only renders state and forwards key presses.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod game;
pub mod items;
pub mod quests;
