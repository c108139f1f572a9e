//! sill-config: TOML configuration for the sill desktop playspace.

pub mod errors;
pub mod loading;
pub mod types;
pub mod validation;

pub use errors::ConfigError;
pub use loading::{load_config_file, load_hierarchy, load_hierarchy_with, merge_configs};
pub use types::{
    DebugConfig, DrawMode, PipelineConfig, PlayspaceConfig, SillConfig, WatchConfig, WindowConfig,
};
pub use validation::validate_config;
