//! Layer tables
//!
//! The host owns the real keymap.  These tables only cover the keys this crate cares about (the
//! movement keys, the home row, the modifiers and the few custom codes), which is enough to drive
//! the core the way the host would: look up the keycode for a position through the active layers
//! on press, and reuse that keycode on release.

use usbd_human_interface_device::page::Keyboard;

use crate::keys::*;
use crate::socd::Direction;
use crate::{KeyPos, Keycode, Layer, Layers, Mods};

const fn k(key: Keyboard) -> Keycode {
    Keycode::Key(key)
}

const fn mt(mods: Mods, key: Keyboard) -> Keycode {
    Keycode::ModTap(mods, key)
}

static BASE: [(KeyPos, Keycode); 29] = [
    (KEY_ESC, k(Keyboard::Escape)),
    (KEY_GRAVE, k(Keyboard::Grave)),
    (KEY_1, k(Keyboard::Keyboard1)),
    (KEY_2, k(Keyboard::Keyboard2)),
    (KEY_TAB, k(Keyboard::Tab)),
    (KEY_Q, k(Keyboard::Q)),
    (KEY_W, k(Keyboard::W)),
    (KEY_E, k(Keyboard::E)),
    (KEY_R, k(Keyboard::R)),
    (KEY_CAPS, k(Keyboard::CapsLock)),
    (KEY_A, k(Keyboard::A)),
    (KEY_S, k(Keyboard::S)),
    (KEY_D, k(Keyboard::D)),
    (KEY_F, k(Keyboard::F)),
    (KEY_G, k(Keyboard::G)),
    (KEY_H, k(Keyboard::H)),
    (KEY_J, k(Keyboard::J)),
    (KEY_K, k(Keyboard::K)),
    (KEY_L, k(Keyboard::L)),
    (KEY_SEMI, k(Keyboard::Semicolon)),
    (KEY_LSHIFT, k(Keyboard::LeftShift)),
    (KEY_LCTRL, k(Keyboard::LeftControl)),
    (KEY_LGUI, k(Keyboard::LeftGUI)),
    (KEY_LALT, k(Keyboard::LeftAlt)),
    (KEY_SPACE, k(Keyboard::Space)),
    (KEY_RALT, k(Keyboard::RightAlt)),
    (KEY_FUNC, Keycode::Momentary(Layer::Fn)),
    (KEY_MENU, Keycode::No),
    (KEY_RCTRL, k(Keyboard::RightControl)),
];

static HOME_ROW: [(KeyPos, Keycode); 9] = [
    (KEY_A, mt(Mods::GUI, Keyboard::A)),
    (KEY_S, mt(Mods::ALT, Keyboard::S)),
    (KEY_D, mt(Mods::CONTROL, Keyboard::D)),
    (KEY_F, mt(Mods::SHIFT, Keyboard::F)),
    (KEY_J, mt(Mods::SHIFT, Keyboard::J)),
    (KEY_K, mt(Mods::CONTROL, Keyboard::K)),
    (KEY_L, mt(Mods::ALT, Keyboard::L)),
    (KEY_SEMI, mt(Mods::GUI, Keyboard::Semicolon)),
    (KEY_LALT, Keycode::Momentary(Layer::Nav)),
];

static NAV: [(KeyPos, Keycode); 8] = [
    (KEY_A, k(Keyboard::LeftGUI)),
    (KEY_S, k(Keyboard::LeftAlt)),
    (KEY_D, k(Keyboard::LeftControl)),
    (KEY_F, k(Keyboard::LeftShift)),
    (KEY_H, k(Keyboard::LeftArrow)),
    (KEY_J, k(Keyboard::DownArrow)),
    (KEY_K, k(Keyboard::UpArrow)),
    (KEY_L, k(Keyboard::RightArrow)),
];

static GAME: [(KeyPos, Keycode); 5] = [
    (KEY_W, Keycode::Socd(Direction::Up)),
    (KEY_A, Keycode::Socd(Direction::Left)),
    (KEY_S, Keycode::Socd(Direction::Down)),
    (KEY_D, Keycode::Socd(Direction::Right)),
    (KEY_MENU, Keycode::GameToggle),
];

static FN: [(KeyPos, Keycode); 2] = [(KEY_1, Keycode::SocdOn), (KEY_2, Keycode::SocdOff)];

/// The entries defined on one layer.  Positions not listed are transparent.
pub fn layer_table(layer: Layer) -> &'static [(KeyPos, Keycode)] {
    match layer {
        Layer::Base => &BASE,
        Layer::HomeRow => &HOME_ROW,
        Layer::Nav => &NAV,
        Layer::Game => &GAME,
        Layer::Fn => &FN,
    }
}

/// Resolve a position through the active layers.  The highest layer that defines the position
/// wins.
pub fn lookup(layers: Layers, pos: KeyPos) -> Keycode {
    layers
        .top_down()
        .find_map(|layer| {
            layer_table(layer)
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, code)| *code)
        })
        .unwrap_or(Keycode::No)
}

/// Names for the positions in the tables, as used by scripts.
pub static KEY_NAMES: [(&str, KeyPos); 29] = [
    ("esc", KEY_ESC),
    ("grave", KEY_GRAVE),
    ("1", KEY_1),
    ("2", KEY_2),
    ("tab", KEY_TAB),
    ("q", KEY_Q),
    ("w", KEY_W),
    ("e", KEY_E),
    ("r", KEY_R),
    ("caps", KEY_CAPS),
    ("a", KEY_A),
    ("s", KEY_S),
    ("d", KEY_D),
    ("f", KEY_F),
    ("g", KEY_G),
    ("h", KEY_H),
    ("j", KEY_J),
    ("k", KEY_K),
    ("l", KEY_L),
    (";", KEY_SEMI),
    ("lshift", KEY_LSHIFT),
    ("lctrl", KEY_LCTRL),
    ("lgui", KEY_LGUI),
    ("lalt", KEY_LALT),
    ("space", KEY_SPACE),
    ("ralt", KEY_RALT),
    ("fn", KEY_FUNC),
    ("menu", KEY_MENU),
    ("rctrl", KEY_RCTRL),
];

pub fn position_by_name(name: &str) -> Option<KeyPos> {
    KEY_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, pos)| *pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_layers() {
        let layers = Layers::BASE | Layers::HOME_ROW;
        assert_eq!(lookup(layers, KEY_W), Keycode::Key(Keyboard::W));
        assert_eq!(lookup(layers, KEY_A), Keycode::ModTap(Mods::GUI, Keyboard::A));
        assert_eq!(lookup(layers, KEY_LALT), Keycode::Momentary(Layer::Nav));
        assert_eq!(lookup(layers, KEY_MENU), Keycode::No);
    }

    #[test]
    fn game_layers() {
        assert_eq!(lookup(Layers::IN_GAME, KEY_A), Keycode::Socd(Direction::Left));
        assert_eq!(lookup(Layers::IN_GAME, KEY_J), Keycode::Key(Keyboard::J));
        assert_eq!(lookup(Layers::IN_GAME, KEY_MENU), Keycode::GameToggle);
        assert_eq!(lookup(Layers::IN_GAME, KEY_LALT), Keycode::Key(Keyboard::LeftAlt));
    }

    #[test]
    fn no_layers() {
        assert_eq!(lookup(Layers::empty(), KEY_W), Keycode::No);
    }

    #[test]
    fn names() {
        assert_eq!(position_by_name("W"), Some(KEY_W));
        assert_eq!(position_by_name(";"), Some(KEY_SEMI));
        assert_eq!(position_by_name("numlock"), None);
        // Everything with a name is on the base layer, except the spare key.
        for (name, pos) in KEY_NAMES.iter().filter(|(_, p)| *p != KEY_MENU) {
            assert_ne!(lookup(Layers::BASE, *pos), Keycode::No, "{}", name);
        }
    }
}
