//! Shared helpers

pub mod terminal;
pub mod tools;
