//! Replay a key script through the keymap core, and show what the host would see.
//!
//! ```text
//! socd-sim +w +s -s -w
//! socd-sim --threshold 5 +w +a +w +a +w
//! socd-sim hid:01 +a +d -a -d hid:02
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use log::info;

use socd_keymap::{
    keymap, rawhid, Config, HostActions, KeyEvent, KeyPos, Keyboard, Keycode, Layers,
    ResolverContext,
};

#[derive(Parser, Debug)]
#[command(name = "socd-sim")]
#[command(about = "Replay key presses through the SOCD and game mode logic")]
struct Cli {
    /// Alternations between movement keys that switch to game mode (0 disables).
    #[arg(long)]
    threshold: Option<u8>,

    /// A CBOR configuration blob to start from.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Steps: `+name` presses a key, `-name` releases it, `hid:XX` sends a raw HID command byte.
    #[arg(required = true)]
    steps: Vec<String>,
}

#[derive(Debug)]
enum Step {
    Press(KeyPos),
    Release(KeyPos),
    Hid(u8),
}

fn parse_step(text: &str) -> Result<Step> {
    if let Some(code) = text.strip_prefix("hid:") {
        let code = u8::from_str_radix(code.trim_start_matches("0x"), 16)
            .map_err(|e| anyhow!("Bad raw HID command {:?}: {}", code, e))?;
        return Ok(Step::Hid(code));
    }

    let (press, name) = if let Some(name) = text.strip_prefix('+') {
        (true, name)
    } else if let Some(name) = text.strip_prefix('-') {
        (false, name)
    } else {
        bail!("Step {:?} must start with '+', '-' or 'hid:'", text);
    };

    let pos = keymap::position_by_name(name).ok_or_else(|| anyhow!("Unknown key {:?}", name))?;
    Ok(if press {
        Step::Press(pos)
    } else {
        Step::Release(pos)
    })
}

/// The part of the firmware the core talks to.  Prints everything it is asked to do.
struct SimHost {
    layers: Layers,
    /// Keycodes of held keys, as resolved when they went down.
    held: HashMap<KeyPos, Keycode>,
}

impl SimHost {
    fn new() -> Self {
        SimHost {
            layers: Layers::BASE,
            held: HashMap::new(),
        }
    }

    fn press(&mut self, pos: KeyPos) -> KeyEvent {
        let code = keymap::lookup(self.layers, pos);
        self.held.insert(pos, code);
        KeyEvent::press(pos, code)
    }

    fn release(&mut self, pos: KeyPos) -> KeyEvent {
        let code = self
            .held
            .remove(&pos)
            .unwrap_or_else(|| keymap::lookup(self.layers, pos));
        KeyEvent::release(pos, code)
    }
}

impl HostActions for SimHost {
    fn set_key(&mut self, key: Keyboard, down: bool) {
        println!("    key {:?} {}", key, if down { "down" } else { "up" });
    }

    fn layer_state(&self) -> Layers {
        self.layers
    }

    fn set_layer_state(&mut self, layers: Layers) {
        println!("    layers {:?}", layers);
        self.layers = layers;
    }

    fn signal_pulse(&mut self, key: Keyboard) {
        println!("    pulse {:?}", key);
    }

    fn forward(&mut self, event: KeyEvent) {
        let what = if event.pressed { "press" } else { "release" };
        println!("    forward {} {:?}", what, event.keycode);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let blob = std::fs::read(path)?;
            Config::from_cbor(&blob)
                .ok_or_else(|| anyhow!("{} is not a valid configuration", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.alternation_threshold = threshold;
    }
    info!("Using {:?}", config);

    let steps = cli
        .steps
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    let mut host = SimHost::new();
    let mut context = ResolverContext::new(config);
    context.init(&mut host);

    for (text, step) in cli.steps.iter().zip(steps) {
        println!("{} ({:?})", text, context.mode());
        match step {
            Step::Press(pos) => {
                let event = host.press(pos);
                context.handle_event(event, &mut host);
            }
            Step::Release(pos) => {
                let event = host.release(pos);
                context.handle_event(event, &mut host);
            }
            Step::Hid(code) => {
                let reply = context.handle_raw_hid(&rawhid::report(code), &mut host);
                println!("    reply {:02X}", reply[0]);
            }
        }
    }
    println!("end ({:?})", context.mode());

    Ok(())
}
