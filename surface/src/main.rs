use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use promptgrid::prelude::*;

#[derive(Parser)]
#[command(version, about = "Prompt grid control surface demo")]
struct Args {
    /// Path to a YAML surface configuration
    #[arg(long)]
    config: Option<String>,

    /// List available MIDI input ports and exit
    #[arg(long)]
    list_midi: bool,

    /// Surface width used for layout
    #[arg(long, default_value_t = 900.0)]
    width: f32,

    /// Audio input device to meter for the visualization (default input
    /// when omitted)
    #[arg(long)]
    audio_device: Option<String>,

    /// How long to run the demo loop, in seconds
    #[arg(long, default_value_t = 4)]
    seconds: u64,
}

fn main() {
    init_logger();
    let args = Args::parse();

    if args.list_midi {
        if let Err(err) = print_midi_ports() {
            eprintln!("Unable to list MIDI ports: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let config = match &args.config {
        Some(path) => SurfaceConfig::from_path(path).unwrap_or_else(|err| {
            eprintln!("Failed to load config {}: {}", path, err);
            std::process::exit(1);
        }),
        None => SurfaceConfig::default(),
    };

    if let Err(err) = run(config, args) {
        eprintln!("Surface demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run(config: SurfaceConfig, args: Args) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = event_channel();
    let mut surface =
        ControlSurface::new(config, Box::new(MidirAccess::new()), tx);
    surface.set_prompts(default_prompts());
    surface.attach(args.width);

    let mut meter = LevelMeter::new();
    if let Some(device) = &args.audio_device {
        meter.set_device_name(device.clone());
    }
    if let Err(err) = meter.start() {
        warn!("Audio meter unavailable: {}", err);
    }

    surface.set_playback_state(PlaybackState::Playing);
    info!(
        "Surface up: {} prompts in {} columns, MIDI {}",
        surface.prompts().len(),
        surface.columns(),
        if surface.midi_available() {
            "available"
        } else {
            "unavailable"
        }
    );

    let frame = Duration::from_millis(33);
    let started = Instant::now();
    let deadline = started + Duration::from_secs(args.seconds);

    while Instant::now() < deadline {
        let now = Instant::now();
        let elapsed = now.duration_since(started).as_secs_f32();

        // Stand-in for a hardware knob: sweep the first prompt's weight.
        let mut swept = surface.prompts()[0].clone();
        swept.weight = (elapsed.sin() + 1.0).min(WEIGHT_MAX);
        surface.apply_edit(swept, now);

        surface.set_audio_level(meter.level());
        surface.tick(now);

        for event in rx.try_iter() {
            match event {
                SurfaceEvent::PromptsChanged(prompts) => {
                    info!(
                        "prompts-changed: {}",
                        serde_json::to_string(&prompts)?
                    );
                }
                SurfaceEvent::PlayPause => info!("play-pause toggled"),
                SurfaceEvent::Error(message) => error!("{}", message),
            }
        }

        if surface.needs_render() {
            debug!("background: {}", surface.render().to_css());
        }

        thread::sleep(frame);
    }

    meter.stop();
    surface.detach();
    Ok(())
}

fn print_midi_ports() -> Result<(), Box<dyn Error>> {
    let mut access = MidirAccess::new();
    let devices = access.request_access()?;

    println!("\nAvailable MIDI input ports:");
    for (index, device_id) in devices.iter().enumerate() {
        println!("    {}: {}", index, access.name_of(device_id));
    }
    println!();

    Ok(())
}

fn default_prompts() -> Vec<Prompt> {
    [
        ("Bossa Nova", "#9900ff"),
        ("Chillwave", "#5200ff"),
        ("Drum and Bass", "#ff25f6"),
        ("Post Punk", "#2af6de"),
        ("Shoegaze", "#ffdd28"),
        ("Funk", "#3dffab"),
        ("Chiptune", "#d8ff3e"),
        ("Lush Strings", "#d9b2ff"),
        ("Sparkling Arpeggios", "#9900ff"),
        ("Staccato Rhythms", "#5200ff"),
        ("Punchy Kick", "#ff25f6"),
        ("Dubstep", "#2af6de"),
        ("K Pop", "#ffdd28"),
        ("Neo Soul", "#3dffab"),
        ("Trip Hop", "#d8ff3e"),
        ("Thrash", "#d9b2ff"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (text, color))| {
        let weight = if i == 0 { 1.0 } else { 0.0 };
        Prompt::new(&format!("prompt-{}", i), text, weight, i as u8, color)
    })
    .collect()
}
