//! MIDI device discovery, naming, and active-device selection.
//!
//! The surface never parses MIDI protocol itself – it consumes an ordered
//! device list through the [`MidiAccess`] capability, injected at
//! construction so the core stays testable without a hardware environment.

use std::error::Error;
use std::fmt;

use log::{info, warn};
use midir::{Ignore, MidiInput};

/// Opaque device identifier. The `midir` implementation uses the input port
/// name, which is stable for the lifetime of the connection.
pub type DeviceId = String;

/// Device-binding access failed: no backend, permission denied, or no
/// hardware support. Recovery is local – MIDI-dependent controls go away
/// while the rest of the surface keeps working.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceUnavailable {
    message: String,
}

impl DeviceUnavailable {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DeviceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MIDI devices unavailable: {}", self.message)
    }
}

impl Error for DeviceUnavailable {}

pub trait MidiAccess {
    /// Resolves with an ordered sequence of device identifiers, or signals
    /// [`DeviceUnavailable`]. Fire-and-forget from the surface's
    /// perspective: a resolution arriving after teardown is simply ignored.
    fn request_access(&mut self) -> Result<Vec<DeviceId>, DeviceUnavailable>;

    /// Human-readable label for `device_id`, empty when unknown.
    fn name_of(&self, device_id: &str) -> String;

    fn active_device(&self) -> Option<&str>;

    fn set_active_device(&mut self, device_id: Option<DeviceId>);
}

/// Production [`MidiAccess`] backed by `midir` input-port enumeration.
#[derive(Default)]
pub struct MidirAccess {
    devices: Vec<DeviceId>,
    active: Option<DeviceId>,
}

impl MidirAccess {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MidiAccess for MidirAccess {
    fn request_access(&mut self) -> Result<Vec<DeviceId>, DeviceUnavailable> {
        let mut midi_in = MidiInput::new("promptgrid-devices")
            .map_err(|err| {
                DeviceUnavailable::new(format!(
                    "unable to open MIDI input: {}",
                    err
                ))
            })?;
        midi_in.ignore(Ignore::None);

        let mut devices = vec![];
        for port in midi_in.ports().iter() {
            match midi_in.port_name(port) {
                Ok(name) => devices.push(name),
                Err(err) => {
                    warn!("Skipping unnameable MIDI port: {}", err)
                }
            }
        }

        info!("Found {} MIDI input port(s)", devices.len());
        self.devices = devices.clone();
        Ok(devices)
    }

    fn name_of(&self, device_id: &str) -> String {
        // Identity is the port name, so a known id labels itself.
        if self.devices.iter().any(|id| id == device_id) {
            device_id.to_string()
        } else {
            String::new()
        }
    }

    fn active_device(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn set_active_device(&mut self, device_id: Option<DeviceId>) {
        self.active = device_id.filter(|id| !id.is_empty());
    }
}
