//! Following window focus from the computer side
//!
//! A daemon on the computer watches which window has focus, and tells the keyboard to enter game
//! mode while a game window is focused, and to leave it otherwise.  The keyboard is only told
//! about changes.  The daemon's idea of the keyboard's mode only moves once the keyboard has
//! acknowledged the command, so a failed command is tried again on the next focus change.
//!
//! The niri compositor reports focus changes on `niri msg event-stream`, and describes the focused
//! window with `niri msg focused-window`.  The parsing of both is here.  Talking to niri and to
//! the HID device is left to the daemon binary.

use anyhow::{bail, Result};

use crate::rawhid::{check_reply, Command, REPORT_SIZE};

/// Start of the event stream line announcing a focus change.
pub const FOCUS_CHANGED: &str = "Window focus changed:";

/// The app id games run under by default.
pub const DEFAULT_GAME_APP_ID: &str = "gamescope";

pub fn is_focus_change(line: &str) -> bool {
    line.starts_with(FOCUS_CHANGED)
}

/// Find the app id in the output of `niri msg focused-window`.
///
/// The line looks like `  App ID: "gamescope"`.  Returns `None` if there is no such line, which
/// is what an empty workspace gives.
pub fn parse_app_id(text: &str) -> Option<&str> {
    text.lines().find_map(|line| {
        line.trim()
            .strip_prefix("App ID:")
            .map(|id| id.trim().trim_matches('"'))
    })
}

/// A way to exchange one raw HID report with the keyboard.
pub trait Transport {
    /// Send `request`, and wait for the reply.  Returns the number of bytes read into `reply`;
    /// zero means nothing came back in time.
    fn exchange(
        &mut self,
        request: &[u8; REPORT_SIZE],
        reply: &mut [u8; REPORT_SIZE],
    ) -> Result<usize>;
}

/// Keeps the keyboard's mode in step with the focused window.
pub struct GameModeController<T> {
    transport: T,
    game_app_id: String,
    /// What the keyboard has acknowledged.
    in_game: bool,
}

impl<T: Transport> GameModeController<T> {
    /// The keyboard is assumed to start out in normal mode.
    pub fn new(transport: T, game_app_id: &str) -> Self {
        GameModeController {
            transport,
            game_app_id: game_app_id.to_string(),
            in_game: false,
        }
    }

    pub fn in_game(&self) -> bool {
        self.in_game
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The command needed for this window to have focus, if any.
    pub fn wanted(&self, app_id: Option<&str>) -> Option<Command> {
        let game = app_id == Some(self.game_app_id.as_str());
        match (game, self.in_game) {
            (true, false) => Some(Command::EnterGameMode),
            (false, true) => Some(Command::ExitGameMode),
            _ => None,
        }
    }

    /// Send a command and check the keyboard's reply.
    pub fn send(&mut self, command: Command) -> Result<()> {
        let mut reply = [0u8; REPORT_SIZE];
        let count = self.transport.exchange(&command.request(), &mut reply)?;
        if count > REPORT_SIZE {
            bail!("Reply of {} bytes from a {} byte report", count, REPORT_SIZE);
        }
        check_reply(command, &reply[..count])?;
        Ok(())
    }

    /// Focus moved to a window with this app id (`None` for no window).  Returns the command sent,
    /// if one was needed.  On error the acknowledged mode is unchanged.
    pub fn handle_focus(&mut self, app_id: Option<&str>) -> Result<Option<Command>> {
        let Some(command) = self.wanted(app_id) else {
            return Ok(None);
        };
        self.send(command)?;
        self.in_game = command == Command::EnterGameMode;
        Ok(Some(command))
    }
}
