//! Maps the control surface's observed width to a discrete column count.

use serde::Deserialize;

/// Single-breakpoint layout rule. The breakpoint is configuration, not a
/// hidden magic number.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub breakpoint: f32,
    pub narrow_columns: u32,
    pub wide_columns: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 600.0,
            narrow_columns: 4,
            wide_columns: 6,
        }
    }
}

pub fn columns_for_width(config: &LayoutConfig, width: f32) -> u32 {
    if width <= config.breakpoint {
        config.narrow_columns
    } else {
        config.wide_columns
    }
}

/// Tracks the current column count across resize events. A change only
/// marks derived state dirty; the new count participates in the next render
/// pass.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    config: LayoutConfig,
    columns: u32,
}

impl Layout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            columns: config.narrow_columns,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Recomputes the column count for `width`; returns whether it changed.
    pub fn observe(&mut self, width: f32) -> bool {
        let columns = columns_for_width(&self.config, width);
        let changed = columns != self.columns;
        self.columns = columns;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_a_pure_function_of_width() {
        let config = LayoutConfig::default();
        assert_eq!(columns_for_width(&config, 300.0), 4);
        assert_eq!(columns_for_width(&config, 600.0), 4);
        assert_eq!(columns_for_width(&config, 601.0), 6);
    }

    #[test]
    fn test_observe_reports_changes_only() {
        let mut layout = Layout::new(LayoutConfig::default());
        assert_eq!(layout.columns(), 4);

        assert!(layout.observe(900.0));
        assert_eq!(layout.columns(), 6);
        assert!(!layout.observe(800.0));
        assert!(layout.observe(320.0));
        assert_eq!(layout.columns(), 4);
    }
}
