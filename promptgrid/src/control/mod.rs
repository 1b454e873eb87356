pub mod midi_devices;
pub mod prompts;
pub mod throttle;

pub use midi_devices::*;
pub use prompts::*;
pub use throttle::*;
