//! SOCD keymap core
//!
//! The custom part of a TKL keymap: opposing WASD keys are resolved so the host never sees both
//! keys of an axis down at once, and a small state machine notices when the keyboard is being used
//! for a game and swaps in the game layers.
//!
//! Everything else (matrix scanning, mod-tap timing, the layer stack, USB reports) belongs to the
//! firmware this runs inside, and is reached through [`HostActions`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// #![deny(missing_docs)]

extern crate alloc;

use bitflags::bitflags;

pub use usbd_human_interface_device::page::Keyboard;

pub use config::Config;
pub use context::{HostActions, ResolverContext};
pub use gamemode::Mode;
pub use keycode::Keycode;
pub use keys::KeyPos;
pub use layers::{Layer, Layers};
pub use socd::{Axis, Direction};

pub mod config;
pub mod context;
#[cfg(feature = "std")]
pub mod focus;
pub mod gamemode;
pub mod keycode;
pub mod keymap;
pub mod keys;
pub mod layers;
pub mod rawhid;
pub mod socd;

mod log {
    cfg_if::cfg_if! {
        if #[cfg(feature = "defmt")] {
            pub use defmt::{debug, info, warn};
        } else if #[cfg(feature = "log")] {
            pub use ::log::{debug, info, warn};
        } else {
            // Logging compiled out.
            macro_rules! discard {
                ($($arg:tt)*) => {{
                    if false {
                        let _ = ::core::format_args!($($arg)*);
                    }
                }};
            }
            pub(crate) use discard as debug;
            pub(crate) use discard as info;
            pub(crate) use discard as warn;
        }
    }
}

/// A single physical key transition, as delivered by the matrix scan.
///
/// `keycode` is what the host's layer stack resolved for this position when the key went down.
/// Releases carry the same keycode as their press.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct KeyEvent {
    pub pos: KeyPos,
    pub keycode: Keycode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(pos: KeyPos, keycode: Keycode) -> Self {
        KeyEvent {
            pos,
            keycode,
            pressed: true,
        }
    }

    pub fn release(pos: KeyPos, keycode: Keycode) -> Self {
        KeyEvent {
            pos,
            keycode,
            pressed: false,
        }
    }

    pub fn is_press(&self) -> bool {
        self.pressed
    }
}

bitflags! {
    /// A modifier map. Used by mod-tap keys to say which modifier is held when the key is held
    /// rather than tapped.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
    pub struct Mods: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const GUI = 0b0000_1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_events() {
        let pos = KeyPos::new(3, 1);
        assert!(KeyEvent::press(pos, Keycode::No).is_press());
        assert!(!KeyEvent::release(pos, Keycode::No).is_press());
    }

    // Logging compiled out must still use its arguments.
    #[cfg(not(any(feature = "log", feature = "defmt")))]
    #[test]
    #[deny(unused_variables)]
    fn silent_logging_uses_arguments() {
        let pos = KeyPos::new(2, 2);
        let code = 0x42u8;
        crate::log::info!("{:?}", pos);
        crate::log::warn!("{:x}", code);
        crate::log::debug!("nothing");
    }
}
