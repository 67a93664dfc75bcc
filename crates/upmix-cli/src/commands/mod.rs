//! CLI command implementations.

pub mod layouts;
pub mod presets;
pub mod process;
