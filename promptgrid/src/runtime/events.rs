use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

use crate::control::prompts::PromptCollection;

/// Outbound notifications from the surface to its host. Delivery is an
/// explicit subscription: the host holds the receiving end of the channel.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// Coalesced snapshot of the full prompt mapping, emitted at most once
    /// per broadcast window.
    PromptsChanged(PromptCollection),
    /// Single user-initiated toggle. The surface does not validate current
    /// playback state before emitting.
    PlayPause,
    /// Device-binding access failed; payload is a human-readable message.
    Error(String),
}

pub type SurfaceEventSender = Sender<SurfaceEvent>;
pub type SurfaceEventReceiver = Receiver<SurfaceEvent>;

pub fn event_channel() -> (SurfaceEventSender, SurfaceEventReceiver) {
    mpsc::channel()
}
