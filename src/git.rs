use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::Error;

/// Clone the default branch of a repository using a depth-1 clone
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone_shallow(url: &str, target_dir: &Path) -> Result<(), Error> {
    // Remove target directory if it exists (git won't clone into existing non-empty dir)
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }

    // Create parent directory if it doesn't exist
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    // Execute git clone --depth=1 <url> <target_dir>
    let output = Command::new("git")
        .args(["clone", "--quiet", "--depth=1", url])
        .arg(target_dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitClone {
            url: url.to_string(),
            hint: auth_hint(&stderr),
            message: stderr,
        });
    }

    Ok(())
}

/// Provide a helpful hint for common auth failures
fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
        || stderr.contains("terminal prompts disabled")
    {
        Some(
            "Make sure you have access to the repository. For private repos, ensure an \
             SSH key is loaded in ssh-agent or git credentials are configured"
                .to_string(),
        )
    } else {
        None
    }
}
