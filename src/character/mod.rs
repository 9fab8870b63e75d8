//! Character record, progression, and the flat-file save store.

#![allow(unused_imports)]

pub mod manager;
pub mod progression;
pub mod types;

pub use manager::*;
pub use progression::*;
pub use types::*;
