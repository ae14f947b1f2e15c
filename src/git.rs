use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Ensure `project` is inside a git repository.
pub fn ensure_repo(project: &Path) -> Result<()> {
    let check = Command::new("git")
        .arg("rev-parse")
        .arg("--git-dir")
        .current_dir(project)
        .output()?;
    if !check.status.success() {
        return Err(anyhow::anyhow!(
            "Directory {} is not a git repository: {}",
            project.display(),
            String::from_utf8_lossy(&check.stderr)
        ));
    }
    Ok(())
}

pub fn add(project: &Path, paths: &[&Path]) -> Result<()> {
    let git_add = Command::new("git")
        .arg("add")
        .args(paths)
        .current_dir(project)
        .output()?;
    if !git_add.status.success() {
        return Err(anyhow::anyhow!(
            "git add failed: {}",
            String::from_utf8_lossy(&git_add.stderr)
        ));
    }
    Ok(())
}

/// `git rm -f` a path, tolerating failure. A draft that was never
/// committed is unknown to git and the command does nothing.
pub fn rm_forced(project: &Path, path: &Path) {
    let _ = Command::new("git")
        .arg("rm")
        .arg("-f")
        .arg(path)
        .current_dir(project)
        .output();
}

pub fn has_staged_changes(project: &Path) -> Result<bool> {
    let status = Command::new("git")
        .arg("diff")
        .arg("--cached")
        .arg("--quiet")
        .current_dir(project)
        .status()?;
    Ok(!status.success())
}

pub fn commit(project: &Path, message: &str) -> Result<()> {
    let git_commit = Command::new("git")
        .arg("commit")
        .arg("-m")
        .arg(message)
        .current_dir(project)
        .output()?;
    if !git_commit.status.success() {
        return Err(anyhow::anyhow!(
            "git commit failed: {}",
            String::from_utf8_lossy(&git_commit.stderr)
        ));
    }
    Ok(())
}

pub fn push(project: &Path) -> Result<()> {
    let git_push = Command::new("git")
        .arg("push")
        .current_dir(project)
        .output()?;
    if !git_push.status.success() {
        return Err(anyhow::anyhow!(
            "git push failed: {}",
            String::from_utf8_lossy(&git_push.stderr)
        ));
    }
    Ok(())
}
