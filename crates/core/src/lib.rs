// Public API exports
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for easy access
pub use application::*;
pub use domain::*;
pub use ports::*;
