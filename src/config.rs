//! Keymap configuration.
//!
//! The defaults describe the TKL ANSI board.  A different board, or a different taste in how eager
//! game mode should be, can supply its own configuration as a CBOR blob, the same encoding the
//! board information page uses.

use alloc::vec;
use alloc::vec::Vec;

use minicbor::{Decode, Encode};
use usbd_human_interface_device::page::Keyboard;

use crate::keys::{KeyPos, KEY_A, KEY_D, KEY_J, KEY_K, KEY_L, KEY_S, KEY_SEMI, KEY_W};
use crate::log::warn;
use crate::socd::Direction;

/// How many changes of movement key switch to game mode.
///
/// Eight is enough that strafing back and forth does it quickly, while a word that happens to
/// alternate between two of the letters is unlikely to.
pub const DEFAULT_ALTERNATION_THRESHOLD: u8 = 8;

pub const CONFIG_TAG: u64 = 0x736f63646b6d6170;

/// Why a decoded configuration can't be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigProblem {
    /// Two movement keys at the same position.
    SharedPosition(KeyPos),
    /// An exit key on one of the movement keys.  Game mode would leave on its first move.
    ExitOnMovementKey(KeyPos),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cbor(tag(0x736f63646b6d6170))]
#[cbor(map)]
pub struct Config {
    /// Alternations between movement keys that trigger game mode.  Zero turns that trigger off,
    /// leaving only the all-four-keys gesture and the toggle.
    #[n(1)]
    pub alternation_threshold: u8,

    /// Where the movement keys are.
    #[n(2)]
    pub up: KeyPos,
    #[n(3)]
    pub left: KeyPos,
    #[n(4)]
    pub down: KeyPos,
    #[n(5)]
    pub right: KeyPos,

    /// Keys that leave game mode when pressed.  These are the right hand home row keys, which are
    /// mod-taps in normal mode.
    #[n(6)]
    pub exit_keys: Vec<KeyPos>,

    /// HID usage tapped on entering game mode.
    #[n(7)]
    pub enter_pulse: u8,

    /// HID usage tapped on leaving game mode.
    #[n(8)]
    pub exit_pulse: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            alternation_threshold: DEFAULT_ALTERNATION_THRESHOLD,
            up: KEY_W,
            left: KEY_A,
            down: KEY_S,
            right: KEY_D,
            exit_keys: vec![KEY_J, KEY_K, KEY_L, KEY_SEMI],
            enter_pulse: Keyboard::F24 as u8,
            exit_pulse: Keyboard::F23 as u8,
        }
    }
}

impl Config {
    /// The movement key at a position, if it is one.
    pub fn direction_at(&self, pos: KeyPos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| self.position_of(*dir) == pos)
    }

    pub fn position_of(&self, dir: Direction) -> KeyPos {
        match dir {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }

    pub fn is_exit_key(&self, pos: KeyPos) -> bool {
        self.exit_keys.contains(&pos)
    }

    pub fn enter_pulse(&self) -> Keyboard {
        self.enter_pulse.into()
    }

    pub fn exit_pulse(&self) -> Keyboard {
        self.exit_pulse.into()
    }

    /// Decode a configuration blob.  A blob that doesn't decode is logged and ignored, and the
    /// caller is expected to fall back to the defaults.
    pub fn from_cbor(buffer: &[u8]) -> Option<Config> {
        let config: Config = match minicbor::decode(buffer) {
            Ok(config) => config,
            Err(e) => {
                warn!("Fail to read Config: {:?}", e);
                return None;
            }
        };
        match config.check() {
            Ok(()) => Some(config),
            Err(problem) => {
                warn!("Rejecting Config: {:?}", problem);
                None
            }
        }
    }

    /// Make sure the positions make sense together.
    pub fn check(&self) -> Result<(), ConfigProblem> {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let pos = self.position_of(*a);
            if Direction::ALL[i + 1..]
                .iter()
                .any(|b| self.position_of(*b) == pos)
            {
                return Err(ConfigProblem::SharedPosition(pos));
            }
        }
        match self
            .exit_keys
            .iter()
            .find(|pos| self.direction_at(**pos).is_some())
        {
            Some(pos) => Err(ConfigProblem::ExitOnMovementKey(*pos)),
            None => Ok(()),
        }
    }

    pub fn to_cbor(&self) -> Vec<u8> {
        // Encoding into a Vec can't fail.
        minicbor::to_vec(self).unwrap_or_default()
    }
}
