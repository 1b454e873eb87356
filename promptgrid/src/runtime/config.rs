//! Surface configuration, loadable from a YAML file with full defaults.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::render::background::DEFAULT_BASE_RADIUS;
use crate::render::layout::LayoutConfig;

pub const DEFAULT_BROADCAST_WINDOW_MS: u64 = 100;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub layout: LayoutConfig,
    /// Coalescing window for outbound `PromptsChanged` notifications.
    pub broadcast_window_ms: u64,
    /// Visualization falloff radius for a weight-1.0 prompt at silence.
    pub base_radius: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            broadcast_window_ms: DEFAULT_BROADCAST_WINDOW_MS,
            base_radius: DEFAULT_BASE_RADIUS,
        }
    }
}

impl SurfaceConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn broadcast_window(&self) -> Duration {
        Duration::from_millis(self.broadcast_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::default();
        assert_eq!(config.layout.breakpoint, 600.0);
        assert_eq!(config.layout.narrow_columns, 4);
        assert_eq!(config.layout.wide_columns, 6);
        assert_eq!(config.broadcast_window(), Duration::from_millis(100));
        assert_eq!(config.base_radius, 25.0);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = SurfaceConfig::from_yaml(
            r#"
layout:
  breakpoint: 720
broadcast_window_ms: 250
"#,
        )
        .unwrap();

        assert_eq!(config.layout.breakpoint, 720.0);
        assert_eq!(config.layout.narrow_columns, 4);
        assert_eq!(config.broadcast_window(), Duration::from_millis(250));
        assert_eq!(config.base_radius, 25.0);
    }
}
