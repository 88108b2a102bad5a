//! TCP accept loop and connection lifecycle.

pub mod listener;

pub use listener::{run, serve};
