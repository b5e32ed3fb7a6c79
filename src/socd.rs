//! SOCD resolution
//!
//! W and S move along one axis, A and D along the other.  A game that sees both keys of an axis
//! held at once does something implementation defined, so the resolver makes sure the host only
//! ever sees one of them.  When both are physically held, the one pressed most recently wins.
//! Releasing it hands the axis straight back to the other key if that is still held; there is no
//! neutral state.
//!
//! Physical state is tracked on every transition, whether or not the result is being sent
//! anywhere.  [`SocdResolver::resolve`] then compares what should be asserted with what has been
//! asserted, and sends only the difference.

use enumset::EnumSetType;
use usbd_human_interface_device::page::Keyboard;

use crate::log::debug;
use crate::HostActions;

/// One of the four movement keys.
#[derive(EnumSetType, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The key sent to the host for this direction.
    pub fn key(self) -> Keyboard {
        match self {
            Direction::Up => Keyboard::W,
            Direction::Left => Keyboard::A,
            Direction::Down => Keyboard::S,
            Direction::Right => Keyboard::D,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A pair of opposing directions.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn keys(self) -> [Direction; 2] {
        match self {
            Axis::Vertical => [Direction::Up, Direction::Down],
            Axis::Horizontal => [Direction::Left, Direction::Right],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Default, Debug)]
struct AxisResolution {
    /// The key on this axis that most recently went down.
    last_pressed: Option<Direction>,
}

/// Tracks the four movement keys and what has been sent for them.
#[derive(Clone, Debug)]
pub struct SocdResolver {
    /// Physically held, indexed by direction.
    held: [bool; 4],
    /// Currently asserted to the host, indexed by direction.
    asserted: [bool; 4],
    axes: [AxisResolution; 2],
}

impl Default for SocdResolver {
    fn default() -> Self {
        SocdResolver::new()
    }
}

impl SocdResolver {
    pub const fn new() -> Self {
        SocdResolver {
            held: [false; 4],
            asserted: [false; 4],
            axes: [AxisResolution { last_pressed: None }; 2],
        }
    }

    /// Record a physical transition.  Nothing is sent.
    pub fn track(&mut self, dir: Direction, pressed: bool) {
        self.held[dir.index()] = pressed;
        if pressed {
            self.axes[dir.axis().index()].last_pressed = Some(dir);
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    pub fn is_asserted(&self, dir: Direction) -> bool {
        self.asserted[dir.index()]
    }

    /// The key of this axis that should be down at the host, if any.
    pub fn active(&self, axis: Axis) -> Option<Direction> {
        let [a, b] = axis.keys();
        match (self.is_held(a), self.is_held(b)) {
            (true, false) => Some(a),
            (false, true) => Some(b),
            (false, false) => None,
            (true, true) => self.axes[axis.index()].last_pressed,
        }
    }

    /// Bring the host in line with the resolved state of one axis.
    ///
    /// Releases go out before presses, so the host never has both keys of the axis down, not even
    /// between two calls.
    pub fn resolve(&mut self, axis: Axis, host: &mut dyn HostActions) {
        let active = self.active(axis);
        let keys = axis.keys();

        for dir in keys {
            if self.asserted[dir.index()] && active != Some(dir) {
                host.set_key(dir.key(), false);
                self.asserted[dir.index()] = false;
            }
        }
        for dir in keys {
            if !self.asserted[dir.index()] && active == Some(dir) {
                debug!("socd: {:?} now active", dir);
                host.set_key(dir.key(), true);
                self.asserted[dir.index()] = true;
            }
        }
    }

    /// Track a transition and resolve its axis.
    pub fn handle(&mut self, dir: Direction, pressed: bool, host: &mut dyn HostActions) {
        self.track(dir, pressed);
        self.resolve(dir.axis(), host);
    }

    /// Release everything that is asserted.  Physical state is kept, so a key still held will be
    /// picked up again by the next resolve of its axis.
    pub fn release_all(&mut self, host: &mut dyn HostActions) {
        for dir in Direction::ALL {
            if self.asserted[dir.index()] {
                host.set_key(dir.key(), false);
                self.asserted[dir.index()] = false;
            }
        }
    }
}
