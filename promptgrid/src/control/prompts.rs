//! Canonical prompt state for the control surface.
//!
//! [`PromptStore`] is the single writable source of truth for the prompt
//! collection and the muted-text set. Edits coming from child widgets and
//! from MIDI input all funnel through [`PromptStore::update`] on the one
//! control thread – see [`crate::runtime::surface::ControlSurface`].

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::util::HashSet;

/// Stable, opaque prompt identity. Unique across the collection's lifetime.
pub type PromptId = String;

pub const WEIGHT_MIN: f32 = 0.0;
pub const WEIGHT_MAX: f32 = 2.0;

/// A weighted text directive steering the external generation engine, with
/// an associated MIDI control-change binding and display color.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub prompt_id: PromptId,
    /// Display/control string, also the secondary key used for muting.
    pub text: String,
    /// Intensity in [0, 2]; 0 means inactive.
    pub weight: f32,
    /// MIDI control-change number bound to this prompt's weight, [0, 127].
    pub cc: u8,
    /// 6-digit `#rrggbb` hex color.
    pub color: String,
}

impl Prompt {
    pub fn new(
        prompt_id: &str,
        text: &str,
        weight: f32,
        cc: u8,
        color: &str,
    ) -> Self {
        Self {
            prompt_id: prompt_id.to_string(),
            text: text.to_string(),
            weight: weight.clamp(WEIGHT_MIN, WEIGHT_MAX),
            cc,
            color: color.to_string(),
        }
    }
}

/// Insertion order is the iteration order used for every position-dependent
/// computation (grid row/column, visualization slot).
pub type PromptCollection = IndexMap<PromptId, Prompt>;

#[derive(Clone, Debug, Default)]
pub struct PromptStore {
    prompts: PromptCollection,
    /// Muted texts. Membership is by text, not id, so prompts sharing a text
    /// share a mute.
    filtered: HashSet<String>,
    changed: bool,
}

impl PromptStore {
    pub fn new(prompts: impl IntoIterator<Item = Prompt>) -> Self {
        let mut store = Self::default();
        store.set_prompts(prompts);
        store
    }

    /// Replaces the whole collection (host-supplied configuration, not an
    /// edit – no broadcast is implied).
    pub fn set_prompts(&mut self, prompts: impl IntoIterator<Item = Prompt>) {
        self.prompts = prompts
            .into_iter()
            .map(|prompt| (prompt.prompt_id.clone(), prompt))
            .collect();
        self.changed = true;
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, prompt_id: &str) -> Option<&Prompt> {
        self.prompts.get(prompt_id)
    }

    pub fn prompts(&self) -> &PromptCollection {
        &self.prompts
    }

    /// Replaces the entry at `updated.prompt_id` in place, preserving its
    /// position in the collection. Edits never insert: an unknown id is a
    /// logged no-op and returns `false`.
    pub fn update(&mut self, updated: Prompt) -> bool {
        if !self.prompts.contains_key(&updated.prompt_id) {
            warn!(
                "Ignoring edit for unknown prompt `{}`",
                updated.prompt_id
            );
            return false;
        }

        let mut updated = updated;
        updated.weight = updated.weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
        self.prompts.insert(updated.prompt_id.clone(), updated);
        self.changed = true;
        true
    }

    /// Order-preserving removal; surviving entries keep their relative
    /// iteration order.
    pub fn remove(&mut self, prompt_id: &str) -> Option<Prompt> {
        let removed = self.prompts.shift_remove(prompt_id);
        if removed.is_some() {
            self.changed = true;
        }
        removed
    }

    /// Mutes `text` regardless of weight. Idempotent; returns whether the
    /// set actually grew.
    pub fn add_filtered(&mut self, text: &str) -> bool {
        let inserted = self.filtered.insert(text.to_string());
        if inserted {
            self.changed = true;
        }
        inserted
    }

    pub fn is_filtered(&self, text: &str) -> bool {
        self.filtered.contains(text)
    }

    /// Active prompts (weight > 0, text not muted) in collection iteration
    /// order. The yielded index is the prompt's position within the FULL
    /// collection so each prompt keeps a stable visual slot as neighbors
    /// toggle on and off.
    pub fn active(&self) -> impl Iterator<Item = (usize, &Prompt)> {
        self.prompts
            .values()
            .enumerate()
            .filter(|(_, prompt)| {
                prompt.weight > 0.0 && !self.filtered.contains(&prompt.text)
            })
    }

    /// Owned snapshot for broadcast payloads. Recipients get an immutable
    /// copy rather than an alias of live state.
    pub fn snapshot(&self) -> PromptCollection {
        self.prompts.clone()
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn mark_unchanged(&mut self) {
        self.changed = false;
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> Vec<Prompt> {
        vec![
            Prompt::new("p-0", "Bossa Nova", 1.0, 0, "#9900ff"),
            Prompt::new("p-1", "Chillwave", 0.0, 1, "#5200ff"),
            Prompt::new("p-2", "Drum and Bass", 2.0, 2, "#ff25f6"),
        ]
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = PromptStore::new(bank());
        let edited = Prompt::new("p-1", "Chillwave", 1.5, 1, "#5200ff");
        assert!(store.update(edited));

        let ids: Vec<&str> =
            store.prompts().keys().map(String::as_str).collect();
        assert_eq!(ids, ["p-0", "p-1", "p-2"]);
        assert_eq!(store.get("p-1").unwrap().weight, 1.5);
    }

    #[test]
    fn test_update_on_unknown_id_is_a_no_op() {
        let mut store = PromptStore::new(bank());
        let stray = Prompt::new("p-9", "Shoegaze", 1.0, 9, "#2af6de");
        assert!(!store.update(stray));
        assert_eq!(store.len(), 3);
        assert!(store.get("p-9").is_none());
    }

    #[test]
    fn test_update_clamps_weight_to_domain() {
        let mut store = PromptStore::new(bank());
        store.update(Prompt::new("p-0", "Bossa Nova", 1.0, 0, "#9900ff"));

        let mut hot = store.get("p-0").unwrap().clone();
        hot.weight = 7.0;
        store.update(hot);
        assert_eq!(store.get("p-0").unwrap().weight, WEIGHT_MAX);
    }

    #[test]
    fn test_remove_preserves_survivor_order() {
        let mut store = PromptStore::new(bank());
        assert!(store.remove("p-1").is_some());

        let ids: Vec<&str> =
            store.prompts().keys().map(String::as_str).collect();
        assert_eq!(ids, ["p-0", "p-2"]);
    }

    #[test]
    fn test_add_filtered_is_idempotent() {
        let mut store = PromptStore::new(bank());
        assert!(store.add_filtered("Bossa Nova"));
        assert!(!store.add_filtered("Bossa Nova"));
        assert!(store.is_filtered("Bossa Nova"));
    }

    #[test]
    fn test_active_uses_full_collection_indices() {
        let mut store = PromptStore::new(bank());
        store.add_filtered("Bossa Nova");

        // p-0 muted, p-1 weightless; only p-2 survives, at its original
        // index within the full collection.
        let active: Vec<(usize, &str)> = store
            .active()
            .map(|(index, prompt)| (index, prompt.prompt_id.as_str()))
            .collect();
        assert_eq!(active, [(2, "p-2")]);
    }

    #[test]
    fn test_prompt_serializes_camel_case() {
        let prompt = Prompt::new("p-0", "Bossa Nova", 1.0, 0, "#9900ff");
        let json = serde_json::to_string(&prompt).unwrap();
        assert!(json.contains(r#""promptId":"p-0""#));
        assert!(json.contains(r#""cc":0"#));
    }

    #[test]
    fn test_change_tracking() {
        let mut store = PromptStore::new(bank());
        assert!(store.changed());
        store.mark_unchanged();
        assert!(!store.changed());

        store.update(Prompt::new("p-0", "Bossa Nova", 0.5, 0, "#9900ff"));
        assert!(store.changed());
    }
}
