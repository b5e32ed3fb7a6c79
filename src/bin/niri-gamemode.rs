//! Switch the keyboard to game mode while a game window has focus under niri.
//!
//! ```text
//! niri-gamemode
//! KEYBOARD_VID=0x362D KEYBOARD_PID=0x0210 niri-gamemode
//! niri-gamemode --app-id steam_app_1091500
//! ```

use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use hidapi::{HidApi, HidDevice};
use log::{debug, info, warn};

use socd_keymap::focus::{
    is_focus_change, parse_app_id, GameModeController, Transport, DEFAULT_GAME_APP_ID,
};
use socd_keymap::rawhid::{REPORT_SIZE, USAGE, USAGE_PAGE};

#[derive(Parser, Debug)]
#[command(name = "niri-gamemode")]
#[command(about = "Keep the keyboard in game mode while a game window is focused")]
struct Cli {
    /// USB vendor id of the keyboard, in hex.
    #[arg(long, env = "KEYBOARD_VID", value_parser = parse_hex)]
    vid: Option<u16>,

    /// USB product id of the keyboard, in hex.
    #[arg(long, env = "KEYBOARD_PID", value_parser = parse_hex)]
    pid: Option<u16>,

    /// App id of the windows that are games.
    #[arg(long, default_value = DEFAULT_GAME_APP_ID)]
    app_id: String,

    /// How long to wait for the keyboard to answer, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    timeout: i32,
}

fn parse_hex(text: &str) -> Result<u16, ParseIntError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16)
}

/// The keyboard's raw HID interface.
struct HidTransport {
    device: HidDevice,
    timeout: i32,
}

impl Transport for HidTransport {
    fn exchange(
        &mut self,
        request: &[u8; REPORT_SIZE],
        reply: &mut [u8; REPORT_SIZE],
    ) -> Result<usize> {
        debug!("send {:02X?}", &request[..8]);
        self.device
            .write(request)
            .context("Failed to send HID command")?;
        let count = self
            .device
            .read_timeout(reply, self.timeout)
            .context("Failed to read response")?;
        debug!("recv {} bytes: {:02X?}", count, &reply[..count.min(8)]);
        Ok(count)
    }
}

/// Find the raw HID interface by its usage, narrowed by vendor and product id when given.
fn find_keyboard(api: &HidApi, vid: Option<u16>, pid: Option<u16>) -> Result<HidDevice> {
    let info = api
        .device_list()
        .filter(|d| vid.map_or(true, |v| d.vendor_id() == v))
        .filter(|d| pid.map_or(true, |p| d.product_id() == p))
        .find(|d| d.usage_page() == USAGE_PAGE && d.usage() == USAGE)
        .ok_or_else(|| {
            anyhow!(
                "No raw HID keyboard found (usage page {:04X}, usage {:02X}); set KEYBOARD_VID \
                 and KEYBOARD_PID to pick one",
                USAGE_PAGE,
                USAGE
            )
        })?;

    info!(
        "Keyboard {:04X}:{:04X} {} {} at {:?}",
        info.vendor_id(),
        info.product_id(),
        info.manufacturer_string().unwrap_or("Unknown"),
        info.product_string().unwrap_or("Unknown"),
        info.path()
    );
    Ok(api.open_path(info.path())?)
}

/// The app id of the focused window, if there is one.
fn focused_app_id() -> Result<Option<String>> {
    let output = Command::new("niri")
        .args(["msg", "focused-window"])
        .output()
        .context("Failed to run niri msg focused-window")?;
    if !output.status.success() {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(&output.stdout);
    Ok(parse_app_id(&text).map(str::to_string))
}

fn follow_focus(controller: &mut GameModeController<HidTransport>) -> Result<()> {
    let mut child = Command::new("niri")
        .args(["msg", "event-stream"])
        .stdout(Stdio::piped())
        .spawn()
        .context("Failed to start niri msg event-stream")?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("No stdout from niri"))?;

    for line in BufReader::new(stdout).lines() {
        let line = line?;
        if !is_focus_change(&line) {
            continue;
        }
        let app_id = match focused_app_id() {
            Ok(app_id) => app_id,
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        };
        debug!("Focus: {:?}", app_id);
        match controller.handle_focus(app_id.as_deref()) {
            Ok(Some(command)) => info!("{:?} acknowledged", command),
            Ok(None) => (),
            Err(e) => warn!("Keyboard: {:#}", e),
        }
    }

    bail!("niri event stream ended")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let api = HidApi::new()?;
    let device = find_keyboard(&api, cli.vid, cli.pid)?;
    let transport = HidTransport {
        device,
        timeout: cli.timeout,
    };
    let mut controller = GameModeController::new(transport, &cli.app_id);

    info!("Watching for {} windows", cli.app_id);
    follow_focus(&mut controller)
}
