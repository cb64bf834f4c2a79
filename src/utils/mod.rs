//! Shared helpers.

pub mod input;
