// src/models/mod.rs
pub mod option;

pub use option::{OptionParameters, OptionType};
