//! Configuration and dependency initialization for the demo.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::DemoConfig;
