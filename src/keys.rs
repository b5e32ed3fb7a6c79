//! Keys on the board
//!
//! Keys are named by where they sit in the scan matrix, (row, column), not by what they type.  The
//! same position produces different keycodes depending on which layers are active, and the SOCD
//! and game mode logic needs to recognize W, A, S and D no matter what they are currently mapped
//! to.
//!
//! The positions here follow the TKL ANSI matrix.  Row 0 is the function row, row 5 the bottom
//! row.

use minicbor::{Decode, Encode};

/// A physical key position.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Encode, Decode)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    #[n(0)]
    pub row: u8,
    #[n(1)]
    pub col: u8,
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        KeyPos { row, col }
    }
}

pub const KEY_ESC: KeyPos = KeyPos::new(0, 0);

pub const KEY_GRAVE: KeyPos = KeyPos::new(1, 0);
pub const KEY_1: KeyPos = KeyPos::new(1, 1);
pub const KEY_2: KeyPos = KeyPos::new(1, 2);

pub const KEY_TAB: KeyPos = KeyPos::new(2, 0);
pub const KEY_Q: KeyPos = KeyPos::new(2, 1);
pub const KEY_W: KeyPos = KeyPos::new(2, 2);
pub const KEY_E: KeyPos = KeyPos::new(2, 3);
pub const KEY_R: KeyPos = KeyPos::new(2, 4);

pub const KEY_CAPS: KeyPos = KeyPos::new(3, 0);
pub const KEY_A: KeyPos = KeyPos::new(3, 1);
pub const KEY_S: KeyPos = KeyPos::new(3, 2);
pub const KEY_D: KeyPos = KeyPos::new(3, 3);
pub const KEY_F: KeyPos = KeyPos::new(3, 4);
pub const KEY_G: KeyPos = KeyPos::new(3, 5);
pub const KEY_H: KeyPos = KeyPos::new(3, 6);
pub const KEY_J: KeyPos = KeyPos::new(3, 7);
pub const KEY_K: KeyPos = KeyPos::new(3, 8);
pub const KEY_L: KeyPos = KeyPos::new(3, 9);
pub const KEY_SEMI: KeyPos = KeyPos::new(3, 10);

pub const KEY_LSHIFT: KeyPos = KeyPos::new(4, 0);

pub const KEY_LCTRL: KeyPos = KeyPos::new(5, 0);
pub const KEY_LGUI: KeyPos = KeyPos::new(5, 1);
pub const KEY_LALT: KeyPos = KeyPos::new(5, 2);
pub const KEY_SPACE: KeyPos = KeyPos::new(5, 6);
pub const KEY_RALT: KeyPos = KeyPos::new(5, 10);
pub const KEY_FUNC: KeyPos = KeyPos::new(5, 11);
/// Unused on the base layer, the game toggle on the game layer.
pub const KEY_MENU: KeyPos = KeyPos::new(5, 12);
pub const KEY_RCTRL: KeyPos = KeyPos::new(5, 13);
