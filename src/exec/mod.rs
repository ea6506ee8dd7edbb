//! External process execution

pub mod subprocess;

pub use subprocess::{yes_answers, CommandSpec};
