//! Derives the layered background visualization from the current prompts,
//! layout, and audio amplitude.
//!
//! The output is a declarative paint description so hosts can consume it as
//! data; [`BackgroundPaint::to_css`] renders the web-view form.

use serde::Serialize;

use crate::control::prompts::PromptStore;

/// Falloff radius for a weight-1.0 prompt at silence, in
/// viewport-proportional units.
pub const DEFAULT_BASE_RADIUS: f32 = 25.0;

/// One radial color falloff: full color at the center fading to zero
/// opacity at `size`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Glow {
    /// Horizontal center in percent of the surface width.
    pub x: f32,
    /// Vertical center in percent of the surface height.
    pub y: f32,
    /// Falloff extent in viewport-proportional units.
    pub size: f32,
    /// 6-digit `#rrggbb` hex color.
    pub color: String,
}

/// Layers are listed bottom-to-top in prompt collection order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BackgroundPaint {
    layers: Vec<Glow>,
}

impl BackgroundPaint {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Glow] {
        &self.layers
    }

    /// CSS `background-image` value for web-view hosts. CSS paints the
    /// first listed background on top, so layers are emitted in reverse to
    /// keep later-declared glows over earlier ones.
    pub fn to_css(&self) -> String {
        let gradients: Vec<String> = self
            .layers
            .iter()
            .rev()
            .map(|glow| {
                format!(
                    "radial-gradient(circle at {}% {}%, {} 0%, {}00 {}vmin)",
                    glow.x, glow.y, glow.color, glow.color, glow.size
                )
            })
            .collect();
        gradients.join(", ")
    }
}

/// Computes one glow per active prompt. Position comes from the prompt's
/// index within the full collection mapped onto the current grid; single-row
/// and single-column layouts center the free axis at 50% instead of
/// dividing by zero.
pub fn paint(
    store: &PromptStore,
    columns: u32,
    audio_level: f32,
    base_radius: f32,
) -> BackgroundPaint {
    let columns = columns.max(1);
    let num_rows = (store.len() as u32).div_ceil(columns);

    let layers = store
        .active()
        .map(|(index, prompt)| {
            let index = index as u32;
            let row = index / columns;
            let col = index % columns;

            let y = if num_rows <= 1 {
                50.0
            } else {
                row as f32 / (num_rows - 1) as f32 * 100.0
            };
            let x = if columns <= 1 {
                50.0
            } else {
                col as f32 / (columns - 1) as f32 * 100.0
            };

            let size = base_radius * prompt.weight * (1.0 + audio_level);

            Glow {
                x,
                y,
                size,
                color: prompt.color.clone(),
            }
        })
        .collect();

    BackgroundPaint { layers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::prompts::Prompt;

    fn bank(count: usize) -> PromptStore {
        PromptStore::new((0..count).map(|i| {
            Prompt::new(
                &format!("p-{}", i),
                &format!("Prompt {}", i),
                1.0,
                i as u8,
                "#9900ff",
            )
        }))
    }

    #[test]
    fn test_no_active_prompts_paints_nothing() {
        let mut store = bank(4);
        for id in ["p-0", "p-1"] {
            let mut prompt = store.get(id).unwrap().clone();
            prompt.weight = 0.0;
            store.update(prompt);
        }
        store.add_filtered("Prompt 2");
        store.add_filtered("Prompt 3");

        let result = paint(&store, 4, 0.9, DEFAULT_BASE_RADIUS);
        assert!(result.is_none());
        assert_eq!(result.to_css(), "");
    }

    #[test]
    fn test_single_row_centers_vertically() {
        let store = bank(4);
        let result = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);
        assert!(result.layers().iter().all(|glow| glow.y == 50.0));
    }

    #[test]
    fn test_single_column_centers_horizontally() {
        let store = bank(3);
        let result = paint(&store, 1, 0.0, DEFAULT_BASE_RADIUS);
        assert!(result.layers().iter().all(|glow| glow.x == 50.0));
        // Three rows span the full height.
        let ys: Vec<f32> =
            result.layers().iter().map(|glow| glow.y).collect();
        assert_eq!(ys, [0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_seventh_prompt_wraps_to_second_row() {
        // 7 prompts in 6 columns: index 6 lands at row 1, col 0.
        let store = bank(7);
        let result = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);
        let last = result.layers().last().unwrap();
        assert_eq!(last.x, 0.0);
        assert_eq!(last.y, 100.0);
    }

    #[test]
    fn test_muted_prompt_keeps_neighbor_slots_stable() {
        let mut store = bank(3);
        let with_all = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);
        store.add_filtered("Prompt 1");
        let with_mute = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);

        assert_eq!(with_mute.layers().len(), 2);
        assert_eq!(with_mute.layers()[1], with_all.layers()[2]);
    }

    #[test]
    fn test_size_scales_with_weight_and_audio_level() {
        let mut store = bank(2);
        let mut heavy = store.get("p-1").unwrap().clone();
        heavy.weight = 2.0;
        store.update(heavy);

        let quiet = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);
        let loud = paint(&store, 6, 1.0, DEFAULT_BASE_RADIUS);

        // Heavier prompt glows wider at equal level.
        assert!(quiet.layers()[1].size > quiet.layers()[0].size);
        // Louder audio widens every glow.
        assert!(loud.layers()[0].size > quiet.layers()[0].size);
        assert!(loud.layers()[1].size > quiet.layers()[1].size);
    }

    #[test]
    fn test_css_renders_layers_top_first() {
        let store = bank(2);
        let result = paint(&store, 6, 0.0, DEFAULT_BASE_RADIUS);
        let css = result.to_css();

        assert!(css.starts_with("radial-gradient(circle at 20% 50%"));
        assert!(css.contains("#9900ff 0%, #9900ff00 25vmin)"));
    }
}
