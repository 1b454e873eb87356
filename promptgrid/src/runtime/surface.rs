//! Composition root for the prompt control surface.
//!
//! All mutation runs synchronously on the one control thread in response to
//! discrete events: a child-control edit, a resize notification, a device
//! resolution, a toggle. The host drives time explicitly through
//! [`ControlSurface::tick`], which is what makes the broadcast window
//! testable without sleeping.

use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::control::midi_devices::{DeviceId, MidiAccess};
use crate::control::prompts::{Prompt, PromptCollection, PromptStore};
use crate::control::throttle::Throttle;
use crate::render::background::{self, BackgroundPaint};
use crate::render::layout::Layout;
use crate::runtime::config::SurfaceConfig;
use crate::runtime::events::{SurfaceEvent, SurfaceEventSender};

/// Playback state of the external audio client. Opaque to the surface:
/// tracked for display, never derived or mutated here.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Loading,
    Playing,
    Paused,
}

pub struct ControlSurface {
    config: SurfaceConfig,
    store: PromptStore,
    throttle: Throttle,
    layout: Layout,
    midi: Box<dyn MidiAccess>,
    midi_devices: Vec<DeviceId>,
    midi_available: bool,
    playback_state: PlaybackState,
    audio_level: f32,
    events: SurfaceEventSender,
    attached: bool,
}

impl ControlSurface {
    pub fn new(
        config: SurfaceConfig,
        midi: Box<dyn MidiAccess>,
        events: SurfaceEventSender,
    ) -> Self {
        Self {
            store: PromptStore::default(),
            throttle: Throttle::new(config.broadcast_window()),
            layout: Layout::new(config.layout),
            midi,
            midi_devices: vec![],
            midi_available: false,
            playback_state: PlaybackState::default(),
            audio_level: 0.0,
            events,
            attached: false,
            config,
        }
    }

    /// Brings the surface up: computes the layout for the initial width
    /// immediately and requests device-binding access. An access failure is
    /// signaled through one `Error` event and never aborts rendering.
    pub fn attach(&mut self, width: f32) {
        self.attached = true;
        self.layout.observe(width);
        self.store.mark_changed();

        match self.midi.request_access() {
            Ok(devices) => {
                info!("MIDI available with {} device(s)", devices.len());
                self.midi_devices = devices;
                self.midi_available = true;
            }
            Err(err) => {
                self.midi_devices.clear();
                self.midi_available = false;
                self.send(SurfaceEvent::Error(err.to_string()));
            }
        }
    }

    /// Tears the surface down, releasing the pending broadcast and the size
    /// observation deterministically.
    pub fn detach(&mut self) {
        self.attached = false;
        self.throttle.cancel();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Host-supplied initial/replacement collection. Configuration, not an
    /// edit – no broadcast is scheduled.
    pub fn set_prompts(
        &mut self,
        prompts: impl IntoIterator<Item = Prompt>,
    ) {
        self.store.set_prompts(prompts);
    }

    pub fn prompts(&self) -> &PromptCollection {
        self.store.prompts()
    }

    /// Applies an edit from a child control or MIDI input and schedules a
    /// coalesced broadcast.
    pub fn apply_edit(&mut self, updated: Prompt, now: Instant) {
        if self.store.update(updated) {
            self.throttle.request(now);
        }
    }

    /// Removes a prompt, keeping survivors in order, and schedules a
    /// broadcast since the collection contents changed.
    pub fn remove_prompt(&mut self, prompt_id: &str, now: Instant) {
        if self.store.remove(prompt_id).is_some() {
            self.throttle.request(now);
        }
    }

    /// Mutes `text` regardless of weight. Idempotent. Triggers a re-render
    /// only: external consumers subscribe to prompt contents, not mute
    /// state.
    pub fn add_filtered_prompt(&mut self, text: &str) {
        self.store.add_filtered(text);
    }

    /// Emits the play/pause toggle without tracking or validating playback
    /// state.
    pub fn play_pause(&mut self) {
        self.send(SurfaceEvent::PlayPause);
    }

    pub fn set_playback_state(&mut self, state: PlaybackState) {
        self.playback_state = state;
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    pub fn set_audio_level(&mut self, level: f32) {
        let level = level.max(0.0);
        if level != self.audio_level {
            self.audio_level = level;
            self.store.mark_changed();
        }
    }

    pub fn audio_level(&self) -> f32 {
        self.audio_level
    }

    /// Observes a container resize. The updated column count participates
    /// in the next render pass; nothing is re-rendered eagerly.
    pub fn resize(&mut self, width: f32) {
        if self.layout.observe(width) {
            self.store.mark_changed();
        }
    }

    pub fn columns(&self) -> u32 {
        self.layout.columns()
    }

    pub fn midi_available(&self) -> bool {
        self.midi_available
    }

    pub fn midi_devices(&self) -> &[DeviceId] {
        &self.midi_devices
    }

    pub fn device_name(&self, device_id: &str) -> String {
        self.midi.name_of(device_id)
    }

    pub fn active_device(&self) -> Option<&str> {
        self.midi.active_device()
    }

    pub fn set_active_device(&mut self, device_id: Option<DeviceId>) {
        self.midi.set_active_device(device_id);
    }

    /// Advances the broadcast window. When a pending delivery comes due,
    /// exactly one `PromptsChanged` fires carrying a snapshot taken now –
    /// the trailing edge of the window, never an intermediate state.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.throttle.fire(now) {
            self.send(SurfaceEvent::PromptsChanged(self.store.snapshot()));
            return true;
        }
        false
    }

    /// Next pending broadcast deadline, for host scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    pub fn needs_render(&self) -> bool {
        self.store.changed()
    }

    /// Produces the background paint from current prompts, current layout,
    /// and current audio level, and clears the render-dirty flag.
    pub fn render(&mut self) -> BackgroundPaint {
        let paint = background::paint(
            &self.store,
            self.layout.columns(),
            self.audio_level,
            self.config.base_radius,
        );
        self.store.mark_unchanged();
        paint
    }

    fn send(&self, event: SurfaceEvent) {
        if let Err(err) = self.events.send(event) {
            warn!("No subscriber for surface event: {}", err);
        }
    }
}
