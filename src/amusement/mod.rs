//! Amusement identity resolution

pub mod resolver;

pub use resolver::{Amusement, AmusementResolver};
