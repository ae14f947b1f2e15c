use anyhow::Result;
use std::io::Write;
use std::process::{Command, Stdio};

fn candidates() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["pbcopy"]]
    } else {
        &[&["wl-copy"], &["xclip", "-selection", "clipboard"]]
    }
}

/// Copy `text` to the system clipboard through the platform's clipboard
/// command. Callers treat failure as a warning, not an error.
pub fn copy(text: &str) -> Result<()> {
    for cmd in candidates() {
        let spawned = Command::new(cmd[0])
            .args(&cmd[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = spawned else {
            continue;
        };
        // stdin must be dropped so the tool sees EOF before we wait
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        let status = child.wait()?;
        if status.success() {
            return Ok(());
        }
    }
    Err(anyhow::anyhow!(
        "No working clipboard command found (tried {})",
        candidates()
            .iter()
            .map(|c| c[0])
            .collect::<Vec<_>>()
            .join(", ")
    ))
}
