//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. **Hardcoded defaults** - accessor fallbacks on the config types
//! 2. **User config** - `~/.sill/config.toml`
//! 3. **Project config** - `./.sill/config.toml`
//! 4. **Explicit file** - `--config <path>` on the command line
//! 5. **CLI arguments** - individual flags (applied by the binary)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::types::{
    DebugConfig, PipelineConfig, PlayspaceConfig, SillConfig, WatchConfig, WindowConfig,
};
use crate::validation::validate_config;

const CONFIG_DIR: &str = ".sill";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the user and project config files.
///
/// Missing files are skipped; unreadable or unparsable files are errors.
/// The merged result is validated before it is returned.
pub fn load_hierarchy() -> Result<SillConfig, ConfigError> {
    load_hierarchy_with(None)
}

/// Same as [`load_hierarchy`], with an additional explicit config file
/// layered on top. Unlike the implicit files, an explicit file must exist.
pub fn load_hierarchy_with(explicit: Option<&Path>) -> Result<SillConfig, ConfigError> {
    info!(event = "config.load_started", explicit = ?explicit);

    let mut config = SillConfig::default();

    for path in [user_config_path(), project_config_path()]
        .into_iter()
        .flatten()
    {
        match load_config_file(&path) {
            Ok(loaded) => config = merge_configs(config, loaded),
            Err(ConfigError::ConfigNotFound { .. }) => {
                debug!(event = "config.file_skipped", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = explicit {
        let loaded = load_config_file(path)?;
        config = merge_configs(config, loaded);
    }

    validate_config(&config)?;

    info!(event = "config.load_completed");
    Ok(config)
}

/// `~/.sill/config.toml`, if a home directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// `./.sill/config.toml` relative to the working directory.
pub fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<SillConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("{}: {}", path.display(), e),
    })
}

/// Merge two configurations, with `override_config` taking precedence
/// wherever it sets a value.
pub fn merge_configs(base: SillConfig, override_config: SillConfig) -> SillConfig {
    SillConfig {
        pipeline: PipelineConfig {
            title_cache_capacity: override_config
                .pipeline
                .title_cache_capacity
                .or(base.pipeline.title_cache_capacity),
            pool_baseline: override_config
                .pipeline
                .pool_baseline
                .or(base.pipeline.pool_baseline),
            segment_depth: override_config
                .pipeline
                .segment_depth
                .or(base.pipeline.segment_depth),
            cull_interval_frames: override_config
                .pipeline
                .cull_interval_frames
                .or(base.pipeline.cull_interval_frames),
        },
        playspace: PlayspaceConfig {
            scale_factor: override_config
                .playspace
                .scale_factor
                .or(base.playspace.scale_factor),
            edge_buffer_x: override_config
                .playspace
                .edge_buffer_x
                .or(base.playspace.edge_buffer_x),
            edge_buffer_y: override_config
                .playspace
                .edge_buffer_y
                .or(base.playspace.edge_buffer_y),
            camera_depth: override_config
                .playspace
                .camera_depth
                .or(base.playspace.camera_depth),
            target_fps: override_config
                .playspace
                .target_fps
                .or(base.playspace.target_fps),
        },
        window: WindowConfig {
            alpha_mode: override_config.window.alpha_mode.or(base.window.alpha_mode),
            min_window_size: override_config
                .window
                .min_window_size
                .or(base.window.min_window_size),
            display_index: override_config
                .window
                .display_index
                .or(base.window.display_index),
        },
        debug: DebugConfig {
            draw_mode: override_config.debug.draw_mode.or(base.debug.draw_mode),
        },
        watch: WatchConfig {
            paths: override_config.watch.paths.or(base.watch.paths),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DrawMode;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[pipeline\npool_baseline = ");
        let result = load_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_merge_prefers_override_values() {
        let mut base = SillConfig::default();
        base.pipeline.pool_baseline = Some(4);
        base.playspace.scale_factor = Some(2.0);

        let mut over = SillConfig::default();
        over.playspace.scale_factor = Some(1.5);
        over.debug.draw_mode = Some(DrawMode::WindowBorders);

        let merged = merge_configs(base, over);
        assert_eq!(merged.pipeline.pool_baseline(), 4);
        assert_eq!(merged.playspace.scale_factor(), 1.5);
        assert_eq!(merged.debug.draw_mode(), DrawMode::WindowBorders);
    }

    #[test]
    fn test_load_hierarchy_user_then_project() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_config(
            home.path(),
            "[pipeline]\npool_baseline = 8\ntitle_cache_capacity = 32\n",
        );
        write_config(project.path(), "[pipeline]\npool_baseline = 2\n");

        let original_cwd = std::env::current_dir().unwrap();
        let result = temp_env::with_var("HOME", Some(home.path()), || {
            std::env::set_current_dir(project.path()).unwrap();
            let result = load_hierarchy();
            std::env::set_current_dir(&original_cwd).unwrap();
            result
        });

        let config = result.unwrap();
        assert_eq!(config.pipeline.pool_baseline(), 2);
        assert_eq!(config.pipeline.title_cache_capacity(), 32);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_hierarchy_with(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_explicit_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[playspace]\nscale_factor = 0.0\n").unwrap();
        let result = load_hierarchy_with(Some(&path));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }
}
