pub mod config;
pub mod error;
pub mod settings;

pub use config::{LatencyConfig, VeilConfig};
pub use error::{Result, VeilError};
pub use settings::{Dialect, IdentifierStyle, Preset, Settings, Step, StepFlags};
