//! Per-key dispatch
//!
//! [`ResolverContext`] holds all of the state this crate keeps, and [`ResolverContext::handle_event`]
//! is the one entry point the host calls for each key transition.  The host must not call it
//! re-entrantly or from more than one place at a time; everything here assumes each event is
//! finished before the next arrives.
//!
//! Each event goes through the same three steps:
//!
//! 1. If it is a movement key position, the SOCD resolver records the physical change.
//! 2. The mode switch gets to look at it: a press may complete the game mode gesture, or, in game
//!    mode, be one of the keys that leave it.
//! 3. The keycodes this crate owns are handled here, and everything else goes back to the host's
//!    normal processing.

use usbd_human_interface_device::page::Keyboard;

use crate::gamemode::{EntryTracker, ModeSwitch};
use crate::log::{info, warn};
use crate::rawhid::{self, Command, REPLY_UNKNOWN, REPORT_SIZE};
use crate::socd::SocdResolver;
use crate::{Config, KeyEvent, Keycode, Layer, Layers, Mode};

/// What the keymap can ask of the firmware around it.
pub trait HostActions {
    /// Press or release a key in the report sent to the computer.
    fn set_key(&mut self, key: Keyboard, down: bool);

    /// The active layers.
    fn layer_state(&self) -> Layers;

    /// Replace the active layers.
    fn set_layer_state(&mut self, layers: Layers);

    /// Tap a key as a notification to the computer.  Nothing comes back.
    fn signal_pulse(&mut self, key: Keyboard);

    /// Hand the event to the firmware's ordinary keycode processing.
    fn forward(&mut self, event: KeyEvent);
}

/// All of the keymap state.
pub struct ResolverContext {
    config: Config,
    socd: SocdResolver,
    mode: ModeSwitch,
}

impl Default for ResolverContext {
    fn default() -> Self {
        ResolverContext::new(Config::default())
    }
}

impl ResolverContext {
    pub fn new(config: Config) -> Self {
        let mode = ModeSwitch::new(&config);
        ResolverContext {
            config,
            socd: SocdResolver::new(),
            mode,
        }
    }

    /// Called once after the host is up.  Home row mods are on by default.
    pub fn init(&mut self, host: &mut dyn HostActions) {
        host.set_layer_state(host.layer_state() | Layer::HomeRow.bit());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn socd(&self) -> &SocdResolver {
        &self.socd
    }

    pub fn tracker(&self) -> &EntryTracker {
        self.mode.tracker()
    }

    /// Handle a single key event.
    pub fn handle_event(&mut self, event: KeyEvent, host: &mut dyn HostActions) {
        let dir = self.config.direction_at(event.pos);
        if let Some(dir) = dir {
            self.socd.track(dir, event.pressed);
        }

        if self.mode.is_game() {
            if event.keycode.is_gui() || self.config.is_exit_key(event.pos) {
                if event.is_press() {
                    info!("Leaving game mode from key at {:?}", event.pos);
                    self.exit_game(host);
                }
                host.forward(event);
                return;
            }
        } else if event.is_press() && self.mode.observe_press(dir) {
            info!("Game mode gesture at {:?}", event.pos);
            self.enter_game(host);
            // The key that finished the gesture is still handled below, with the keycode it was
            // pressed with.  If the game layer was already on, that is a SOCD key.
        }

        match event.keycode {
            Keycode::Socd(dir) => {
                // SOCD only drives keys while the game layer is up.  A movement key released
                // after leaving it has nothing left to send.
                if host.layer_state().has(Layer::Game) {
                    self.socd.resolve(dir.axis(), host);
                } else {
                    self.socd.release_all(host);
                }
            }
            Keycode::SocdOn => {
                if event.is_press() {
                    host.set_layer_state(host.layer_state() | Layers::GAME);
                }
            }
            Keycode::SocdOff => {
                if event.is_press() {
                    host.set_layer_state(host.layer_state() - Layers::GAME);
                }
            }
            Keycode::GameToggle => {
                if event.is_press() {
                    self.toggle_game(host);
                }
            }
            _ => host.forward(event),
        }
    }

    /// Enter game mode, unless already there.
    pub fn enter_game(&mut self, host: &mut dyn HostActions) {
        self.mode.enter(host);
    }

    /// Leave game mode, unless not in it.  Movement keys held down by SOCD are released so none
    /// of them stay down after the game layer is gone.
    pub fn exit_game(&mut self, host: &mut dyn HostActions) {
        if self.mode.exit(host) {
            self.socd.release_all(host);
        }
    }

    pub fn toggle_game(&mut self, host: &mut dyn HostActions) {
        if self.mode.is_game() {
            self.exit_game(host);
        } else {
            self.enter_game(host);
        }
    }

    /// Handle a raw HID report from the host, returning the reply report.
    pub fn handle_raw_hid(
        &mut self,
        report: &[u8],
        host: &mut dyn HostActions,
    ) -> [u8; REPORT_SIZE] {
        let Some(&code) = report.first() else {
            warn!("Empty raw HID report");
            return rawhid::report(REPLY_UNKNOWN);
        };
        match Command::try_from(code) {
            Ok(Command::EnterGameMode) => {
                self.enter_game(host);
                rawhid::report(code)
            }
            Ok(Command::ExitGameMode) => {
                self.exit_game(host);
                rawhid::report(code)
            }
            Err(code) => {
                warn!("Unknown raw HID command: {:x}", code);
                rawhid::report(REPLY_UNKNOWN)
            }
        }
    }
}
