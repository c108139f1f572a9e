//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::SillConfig;

/// Upper bound for `playspace.target_fps`.
pub const MAX_TARGET_FPS: u32 = 240;

/// Validate a merged [`SillConfig`].
///
/// # Validation Rules
///
/// - `pipeline.title_cache_capacity` must be at least 1
/// - `playspace.scale_factor` must be finite and positive
/// - `playspace.target_fps` must be within `1..=240`
/// - edge buffers must be finite and non-negative
pub fn validate_config(config: &SillConfig) -> Result<(), ConfigError> {
    if config.pipeline.title_cache_capacity() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "pipeline.title_cache_capacity must be at least 1".to_string(),
        });
    }

    let scale = config.playspace.scale_factor();
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("playspace.scale_factor must be positive, got {}", scale),
        });
    }

    let fps = config.playspace.target_fps();
    if fps == 0 || fps > MAX_TARGET_FPS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "playspace.target_fps must be between 1 and {}, got {}",
                MAX_TARGET_FPS, fps
            ),
        });
    }

    for (name, value) in [
        ("edge_buffer_x", config.playspace.edge_buffer_x()),
        ("edge_buffer_y", config.playspace.edge_buffer_y()),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("playspace.{} must be non-negative, got {}", name, value),
            });
        }
    }

    Ok(())
}
