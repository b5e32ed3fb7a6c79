//! Raw HID game mode commands
//!
//! A companion program on the host can switch game mode itself, for example when a game window
//! gets focus.  It talks to the keyboard over the raw HID interface, usage page `0xFF60`, usage
//! `0x61`, in fixed 32-byte reports.
//!
//! The first byte of a request is the command.  The reply echoes the command byte when it was
//! carried out, and is `0xFF` when the command wasn't recognized.  The rest of both reports is
//! zero.  Asking for the mode the keyboard is already in is not an error, and is acknowledged like
//! any other request.

use core::fmt;

pub const REPORT_SIZE: usize = 32;

pub const USAGE_PAGE: u16 = 0xFF60;
pub const USAGE: u16 = 0x61;

/// Reply byte for a command the keyboard doesn't know.
pub const REPLY_UNKNOWN: u8 = 0xFF;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    EnterGameMode = 0x01,
    ExitGameMode = 0x02,
}

impl TryFrom<u8> for Command {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(Command::EnterGameMode),
            0x02 => Ok(Command::ExitGameMode),
            code => Err(code),
        }
    }
}

impl Command {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The report a host sends to issue this command.
    pub fn request(self) -> [u8; REPORT_SIZE] {
        report(self.code())
    }
}

/// A report with the given first byte.
pub fn report(code: u8) -> [u8; REPORT_SIZE] {
    let mut buf = [0u8; REPORT_SIZE];
    buf[0] = code;
    buf
}

/// Ways a reply can fail to acknowledge a command.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ReplyError {
    /// Nothing came back.
    Empty,
    /// The keyboard didn't recognize the command.
    Unknown,
    /// Something else came back.
    Unexpected { expected: u8, got: u8 },
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::Empty => write!(f, "no response from keyboard"),
            ReplyError::Unknown => write!(f, "keyboard returned error (unknown command)"),
            ReplyError::Unexpected { expected, got } => {
                write!(f, "unexpected response: 0x{:02X} (expected 0x{:02X})", got, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReplyError {}

/// Host side check of the keyboard's reply to `command`.
pub fn check_reply(command: Command, reply: &[u8]) -> Result<(), ReplyError> {
    match reply.first() {
        None => Err(ReplyError::Empty),
        Some(&code) if code == command.code() => Ok(()),
        Some(&REPLY_UNKNOWN) => Err(ReplyError::Unknown),
        Some(&got) => Err(ReplyError::Unexpected {
            expected: command.code(),
            got,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(Command::try_from(0x01), Ok(Command::EnterGameMode));
        assert_eq!(Command::try_from(0x02), Ok(Command::ExitGameMode));
        assert_eq!(Command::try_from(0x00), Err(0x00));
        assert_eq!(Command::try_from(0x7f), Err(0x7f));

        let req = Command::ExitGameMode.request();
        assert_eq!(req[0], 0x02);
        assert!(req[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn replies() {
        let cmd = Command::EnterGameMode;
        assert_eq!(check_reply(cmd, &report(0x01)), Ok(()));
        assert_eq!(check_reply(cmd, &[]), Err(ReplyError::Empty));
        assert_eq!(check_reply(cmd, &report(REPLY_UNKNOWN)), Err(ReplyError::Unknown));
        assert_eq!(
            check_reply(cmd, &report(0x02)),
            Err(ReplyError::Unexpected {
                expected: 0x01,
                got: 0x02
            })
        );
        assert_eq!(
            ReplyError::Unexpected { expected: 1, got: 0x2a }.to_string(),
            "unexpected response: 0x2A (expected 0x01)"
        );
    }
}
