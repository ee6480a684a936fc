use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use tracing::info;

/// Command that hands a URL to the desktop's default handler.
pub fn opener_command(url: &str) -> Command {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(url);
    cmd
}

/// Open `url` in a new browser context. The URL is not validated.
pub fn open_url(url: &str) -> Result<()> {
    let mut cmd = opener_command(url);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn()
        .with_context(|| format!("launch opener for {url}"))?;
    info!(url, "opened invite link");
    Ok(())
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("write clipboard")?;
    Ok(())
}
