//! Enemies, combat formulas and the turn-based battle resolver.

#![allow(unused_imports)]

pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use math::*;
pub use types::*;
