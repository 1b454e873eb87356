pub use crate::control::midi_devices::{
    DeviceId, DeviceUnavailable, MidiAccess, MidirAccess,
};
pub use crate::control::prompts::{
    Prompt, PromptCollection, PromptId, PromptStore, WEIGHT_MAX, WEIGHT_MIN,
};
pub use crate::control::throttle::Throttle;
pub use crate::io::meter::{LevelMeter, SmoothingConfig};
pub use crate::logging::init_logger;
pub use crate::logging::{debug, error, info, trace, warn};
pub use crate::render::background::{BackgroundPaint, Glow};
pub use crate::render::layout::{Layout, LayoutConfig};
pub use crate::runtime::config::SurfaceConfig;
pub use crate::runtime::events::{
    SurfaceEvent, SurfaceEventReceiver, SurfaceEventSender, event_channel,
};
pub use crate::runtime::surface::{ControlSurface, PlaybackState};
