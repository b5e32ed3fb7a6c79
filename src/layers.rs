//! Keymap layers.
//!
//! The host keeps the layer state as a bitmask.  Game mode saves that mask on the way in and puts
//! it back untouched on the way out, so [`Layers`] keeps any bits it doesn't have a name for.

use bitflags::bitflags;

/// The layers of this keymap, in stacking order.  Higher layers win.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Base,
    HomeRow,
    Nav,
    Game,
    Fn,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Base,
        Layer::HomeRow,
        Layer::Nav,
        Layer::Game,
        Layer::Fn,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The layer mask with only this layer set.
    pub fn bit(self) -> Layers {
        Layers::from_bits_retain(1 << self.index())
    }
}

bitflags! {
    /// A set of active layers.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Layers: u32 {
        const BASE = 1 << 0;
        const HOME_ROW = 1 << 1;
        const NAV = 1 << 2;
        const GAME = 1 << 3;
        const FN = 1 << 4;
    }
}

impl Layers {
    /// The layer set used while in game mode: the plain base layer with the game layer on top.
    pub const IN_GAME: Layers = Layers::BASE.union(Layers::GAME);

    pub fn has(self, layer: Layer) -> bool {
        self.contains(layer.bit())
    }

    /// Active layers, top of the stack first.
    pub fn top_down(self) -> impl Iterator<Item = Layer> {
        Layer::ALL.into_iter().rev().filter(move |l| self.has(*l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_bits_match_flags() {
        assert_eq!(Layer::Base.bit(), Layers::BASE);
        assert_eq!(Layer::Game.bit(), Layers::GAME);
        assert_eq!(Layer::Fn.bit(), Layers::FN);
    }

    #[test]
    fn unknown_bits_survive() {
        let raw = 0x8000_0102;
        let layers = Layers::from_bits_retain(raw);
        assert_eq!(layers.bits(), raw);
        assert!(layers.has(Layer::HomeRow));
        assert_eq!((layers | Layers::GAME).bits(), raw | Layers::GAME.bits());
    }

    #[test]
    fn top_down_order() {
        let order: Vec<Layer> = (Layers::BASE | Layers::HOME_ROW | Layers::FN).top_down().collect();
        assert_eq!(order, vec![Layer::Fn, Layer::HomeRow, Layer::Base]);
    }
}
