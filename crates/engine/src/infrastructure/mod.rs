//! Infrastructure: port traits and their local implementations.

pub mod clock;
pub mod ports;
pub mod settings;
