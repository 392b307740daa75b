//! Library side of the `prep` command-line client.

pub mod logging;
pub mod render;
pub mod session;
pub mod settings;
