//! Item catalog types, inventory and equipment handling, and the shop.

#![allow(unused_imports)]

pub mod inventory;
pub mod shop;
pub mod types;

pub use inventory::*;
pub use shop::*;
pub use types::*;
