//! Game mode
//!
//! Game mode replaces the whole layer stack with the base layer plus the game layer.  On the game
//! layer W, A, S and D go through SOCD resolution, and the home row mod-tap keys are gone.
//!
//! There is a toggle key, but the usual way in is just to start playing.  While in normal mode,
//! the movement keys are watched.  Seeing all four of them, or seeing enough presses that keep
//! changing between them, switches to game mode.  Any other key resets the count, so ordinary
//! typing that happens to contain the letters doesn't trigger it.
//!
//! The way out is to do something a game wouldn't: press a GUI key, or one of the right hand home
//! row keys.  Those keys still do their normal job on the way out.
//!
//! Each switch taps a key the host can watch for (F24 going in, F23 going out).

use enumset::EnumSet;
use usbd_human_interface_device::page::Keyboard;

use crate::log::info;
use crate::socd::Direction;
use crate::{Config, HostActions, Layers};

/// Which mode the keymap is in.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Normal,
    Game,
}

/// Watches movement key presses for the game mode gesture.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntryTracker {
    /// Movement keys pressed since the last reset.
    seen: EnumSet<Direction>,
    /// How many times the pressed movement key differed from the one before.
    alternations: u8,
    last: Option<Direction>,
}

impl EntryTracker {
    pub fn reset(&mut self) {
        *self = EntryTracker::default();
    }

    /// Record a movement key press.
    pub fn record(&mut self, dir: Direction) {
        self.seen.insert(dir);
        if self.last != Some(dir) {
            self.alternations = self.alternations.saturating_add(1);
            self.last = Some(dir);
        }
    }

    /// Has the gesture been seen.  A threshold of zero never triggers on alternations.
    pub fn triggered(&self, threshold: u8) -> bool {
        self.seen == EnumSet::all() || (threshold > 0 && self.alternations >= threshold)
    }

    pub fn seen(&self) -> EnumSet<Direction> {
        self.seen
    }

    pub fn alternations(&self) -> u8 {
        self.alternations
    }

    pub fn last(&self) -> Option<Direction> {
        self.last
    }

    pub fn is_clear(&self) -> bool {
        self.seen.is_empty() && self.alternations == 0 && self.last.is_none()
    }
}

/// The normal/game state machine.
#[derive(Debug)]
pub struct ModeSwitch {
    mode: Mode,
    /// The layers that were active when game mode was entered.
    saved: Layers,
    tracker: EntryTracker,
    threshold: u8,
    enter_pulse: Keyboard,
    exit_pulse: Keyboard,
}

impl ModeSwitch {
    pub fn new(config: &Config) -> Self {
        ModeSwitch {
            mode: Mode::Normal,
            saved: Layers::empty(),
            tracker: EntryTracker::default(),
            threshold: config.alternation_threshold,
            enter_pulse: config.enter_pulse(),
            exit_pulse: config.exit_pulse(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_game(&self) -> bool {
        self.mode == Mode::Game
    }

    pub fn tracker(&self) -> &EntryTracker {
        &self.tracker
    }

    /// The layers that will be restored on exit.  Only meaningful in game mode.
    pub fn saved_layers(&self) -> Layers {
        self.saved
    }

    /// Feed a key press seen in normal mode.  `dir` is the movement key at the pressed position,
    /// if there is one.  Returns true when the press completes the gesture, which also clears the
    /// tracker.
    pub fn observe_press(&mut self, dir: Option<Direction>) -> bool {
        match dir {
            Some(dir) => {
                self.tracker.record(dir);
                if self.tracker.triggered(self.threshold) {
                    self.tracker.reset();
                    true
                } else {
                    false
                }
            }
            None => {
                self.tracker.reset();
                false
            }
        }
    }

    /// Switch to game mode.  Returns false (and does nothing) if already there.
    pub fn enter(&mut self, host: &mut dyn HostActions) -> bool {
        if self.is_game() {
            return false;
        }
        host.signal_pulse(self.enter_pulse);
        self.saved = host.layer_state();
        host.set_layer_state(Layers::IN_GAME);
        self.mode = Mode::Game;
        self.tracker.reset();
        info!("Mode change: {:?}, saved layers {:x}", self.mode, self.saved.bits());
        true
    }

    /// Switch back to normal mode, restoring the saved layers exactly.  Returns false if not in
    /// game mode.
    pub fn exit(&mut self, host: &mut dyn HostActions) -> bool {
        if !self.is_game() {
            return false;
        }
        host.signal_pulse(self.exit_pulse);
        host.set_layer_state(self.saved);
        self.mode = Mode::Normal;
        info!("Mode change: {:?}, restored layers {:x}", self.mode, self.saved.bits());
        true
    }
}
