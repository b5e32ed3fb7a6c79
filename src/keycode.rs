//! Logical keycodes.
//!
//! This is what a position means once the layer stack has been applied.  Only the codes this
//! crate acts on get their own variants; anything else the host can type is a plain HID key.

use usbd_human_interface_device::page::Keyboard;

use crate::layers::Layer;
use crate::socd::Direction;
use crate::Mods;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Keycode {
    /// Nothing assigned.
    No,
    /// An ordinary key.
    Key(Keyboard),
    /// Types the key when tapped, holds the modifier when held.  The tap/hold decision is made by
    /// the host.
    ModTap(Mods, Keyboard),
    /// Activates a layer while held.
    Momentary(Layer),
    /// A direction that goes through SOCD resolution.
    Socd(Direction),
    /// Turn the game layer on, without entering game mode.
    SocdOn,
    /// Turn the game layer off.
    SocdOff,
    /// Enter or leave game mode.
    GameToggle,
}

impl Keycode {
    /// Is this one of the OS (GUI/Windows) keys.
    pub fn is_gui(&self) -> bool {
        matches!(
            self,
            Keycode::Key(Keyboard::LeftGUI) | Keycode::Key(Keyboard::RightGUI)
        )
    }
}
