//! Input-level metering: the app's stand-in for the external audio
//! pipeline that feeds the surface its amplitude scalar.

use cpal::{Device, Stream, StreamConfig, traits::*};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use log::{debug, error, info, warn};

use crate::util::AtomicF32;

/// Attack/release follower coefficients, applied per input buffer.
#[derive(Clone, Copy, Debug)]
pub struct SmoothingConfig {
    pub rise: f32,
    pub fall: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            rise: 0.5,
            fall: 0.05,
        }
    }
}

fn follow(previous: f32, peak: f32, smoothing: SmoothingConfig) -> f32 {
    let coefficient = if peak > previous {
        smoothing.rise
    } else {
        smoothing.fall
    };
    previous + (peak - previous) * coefficient
}

/// Peak-follows the first channel of an input device and publishes the
/// smoothed level through a shared [`AtomicF32`] the control thread polls.
#[derive(Default)]
pub struct LevelMeter {
    level: Arc<AtomicF32>,
    smoothing: SmoothingConfig,
    device_name: Option<String>,
    stream: Option<Stream>,
    is_active: bool,
}

impl LevelMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_device_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.device_name = if name.is_empty() { None } else { Some(name) };
    }

    pub fn set_smoothing(&mut self, smoothing: SmoothingConfig) {
        self.smoothing = smoothing;
    }

    /// Shared handle the host can poll from its update loop.
    pub fn handle(&self) -> Arc<AtomicF32> {
        self.level.clone()
    }

    pub fn level(&self) -> f32 {
        self.level.load(Ordering::Relaxed)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn start(&mut self) -> Result<(), Box<dyn Error>> {
        let (device, stream_config) = self.device_and_stream_config()?;
        let channels = stream_config.channels as usize;

        if channels < 1 {
            return Err("Device must have at least one channel".into());
        }

        let level = self.level.clone();
        let smoothing = self.smoothing;

        let stream = device.build_input_stream(
            &stream_config,
            move |data: &[f32], _| {
                let mut peak = 0.0f32;
                for sample in data.iter().step_by(channels) {
                    peak = peak.max(sample.abs());
                }
                let previous = level.load(Ordering::Relaxed);
                level.store(
                    follow(previous, peak, smoothing),
                    Ordering::Relaxed,
                );
            },
            move |err| error!("Error in audio stream: {}", err),
            None,
        )?;

        stream.play()?;
        self.stream = Some(stream);
        self.is_active = true;
        info!(
            "Level meter connected to device: {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        Ok(())
    }

    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            self.is_active = false;
            debug!("Level meter stopped");
        }
    }

    fn device_and_stream_config(
        &self,
    ) -> Result<(Device, StreamConfig), Box<dyn Error>> {
        let host = cpal::default_host();

        let device = match &self.device_name {
            Some(name) => host
                .input_devices()?
                .find(|d| d.name().map(|n| n == *name).unwrap_or(false))
                .ok_or_else(|| {
                    Box::<dyn Error>::from(format!(
                        "Audio device '{}' not found",
                        name
                    ))
                })?,
            None => {
                warn!("No audio device named; using default input");
                host.default_input_device()
                    .ok_or("No default audio input device")?
            }
        };

        let stream_config = device.default_input_config()?.into();
        Ok((device, stream_config))
    }
}
