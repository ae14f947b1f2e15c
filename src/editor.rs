use anyhow::Result;
use std::env;
use std::path::Path;
use std::process::Command;

/// Pick the command used to open files: QUILL_EDITOR, then EDITOR, then
/// the platform's file opener.
fn editor_command() -> String {
    env::var("QUILL_EDITOR")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(windows) {
                "notepad".to_string()
            } else {
                "xdg-open".to_string()
            }
        })
}

pub fn open_file(path: &Path) -> Result<()> {
    let editor = editor_command();
    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch '{}': {}", editor, e))?;
    if !status.success() {
        eprintln!("'{}' exited with status {:?}", editor, status.code());
    }
    Ok(())
}
