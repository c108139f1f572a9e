//! Configuration type definitions for sill.
//!
//! These types are deserialized from TOML config files. Every field is
//! optional so that a project config can override a single value of the
//! user config; the accessor methods supply the built-in defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [pipeline]
//! title_cache_capacity = 64
//! pool_baseline = 16
//!
//! [playspace]
//! scale_factor = 1.25
//! target_fps = 60
//!
//! [window]
//! alpha_mode = true
//!
//! [debug]
//! draw_mode = "window_tops"
//!
//! [watch]
//! paths = ["/home/me/Desktop"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TITLE_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_POOL_BASELINE: usize = 16;
pub const DEFAULT_SEGMENT_DEPTH: f32 = 2.0;
pub const DEFAULT_CULL_INTERVAL_FRAMES: u64 = 300;
pub const DEFAULT_SCALE_FACTOR: f32 = 1.0;
pub const DEFAULT_EDGE_BUFFER_X: f32 = 20.0;
pub const DEFAULT_EDGE_BUFFER_Y: f32 = 20.5;
pub const DEFAULT_CAMERA_DEPTH: f32 = -10.0;
pub const DEFAULT_TARGET_FPS: u32 = 60;
pub const DEFAULT_MIN_WINDOW_SIZE: u32 = 10;

/// Main configuration loaded from TOML config files.
///
/// Loaded from (later overrides earlier):
/// 1. User config: `~/.sill/config.toml`
/// 2. Project config: `./.sill/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SillConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub playspace: PlayspaceConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub debug: DebugConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

/// Sizing of the per-frame surface pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of window titles kept in the LRU title cache.
    #[serde(default)]
    pub title_cache_capacity: Option<usize>,

    /// Number of collider entities the pool keeps around after a cull.
    #[serde(default)]
    pub pool_baseline: Option<usize>,

    /// Synthetic z value given to every resolved segment.
    #[serde(default)]
    pub segment_depth: Option<f32>,

    /// How many frames pass between opportunistic pool culls. 0 disables culling.
    #[serde(default)]
    pub cull_interval_frames: Option<u64>,
}

impl PipelineConfig {
    pub fn title_cache_capacity(&self) -> usize {
        self.title_cache_capacity
            .unwrap_or(DEFAULT_TITLE_CACHE_CAPACITY)
    }

    pub fn pool_baseline(&self) -> usize {
        self.pool_baseline.unwrap_or(DEFAULT_POOL_BASELINE)
    }

    pub fn segment_depth(&self) -> f32 {
        self.segment_depth.unwrap_or(DEFAULT_SEGMENT_DEPTH)
    }

    pub fn cull_interval_frames(&self) -> u64 {
        self.cull_interval_frames
            .unwrap_or(DEFAULT_CULL_INTERVAL_FRAMES)
    }
}

/// Coordinate transform and frame pacing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayspaceConfig {
    #[serde(default)]
    pub scale_factor: Option<f32>,

    /// Horizontal margin (scaled pixels) kept free when clamping positions.
    #[serde(default)]
    pub edge_buffer_x: Option<f32>,

    /// Vertical margin (scaled pixels) kept free when clamping positions.
    #[serde(default)]
    pub edge_buffer_y: Option<f32>,

    #[serde(default)]
    pub camera_depth: Option<f32>,

    #[serde(default)]
    pub target_fps: Option<u32>,
}

impl PlayspaceConfig {
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR)
    }

    pub fn edge_buffer_x(&self) -> f32 {
        self.edge_buffer_x.unwrap_or(DEFAULT_EDGE_BUFFER_X)
    }

    pub fn edge_buffer_y(&self) -> f32 {
        self.edge_buffer_y.unwrap_or(DEFAULT_EDGE_BUFFER_Y)
    }

    pub fn camera_depth(&self) -> f32 {
        self.camera_depth.unwrap_or(DEFAULT_CAMERA_DEPTH)
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps.unwrap_or(DEFAULT_TARGET_FPS)
    }
}

/// Behaviour of the companion's own window and the window query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Sample the framebuffer alpha under the pointer to decide click pass-through.
    #[serde(default)]
    pub alpha_mode: Option<bool>,

    /// Windows narrower or shorter than this (pixels) are ignored.
    #[serde(default)]
    pub min_window_size: Option<u32>,

    /// Index of the display the playspace starts on.
    #[serde(default)]
    pub display_index: Option<usize>,
}

impl WindowConfig {
    pub fn alpha_mode(&self) -> bool {
        self.alpha_mode.unwrap_or(true)
    }

    pub fn min_window_size(&self) -> u32 {
        self.min_window_size.unwrap_or(DEFAULT_MIN_WINDOW_SIZE)
    }

    pub fn display_index(&self) -> usize {
        self.display_index.unwrap_or(0)
    }
}

/// Debug visualisation mode as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Off,
    WindowBorders,
    WindowTops,
}

impl std::str::FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(DrawMode::Off),
            "borders" | "window_borders" => Ok(DrawMode::WindowBorders),
            "tops" | "window_tops" => Ok(DrawMode::WindowTops),
            other => Err(format!(
                "Unknown draw mode '{}'. Valid options: off, borders, tops",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub draw_mode: Option<DrawMode>,
}

impl DebugConfig {
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode.unwrap_or_default()
    }
}

/// Directories watched for file-system changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub paths: Option<Vec<PathBuf>>,
}

impl WatchConfig {
    pub fn paths(&self) -> &[PathBuf] {
        self.paths.as_deref().unwrap_or(&[])
    }
}
