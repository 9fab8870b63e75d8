//! Loading the quest and item catalogs from their text files.

#![allow(unused_imports)]

pub mod defaults;
pub mod loader;
pub mod parser;

pub use defaults::*;
pub use loader::*;
pub use parser::*;
