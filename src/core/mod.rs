//! Core types shared across the crate.

mod key;

pub use key::ModelKey;
