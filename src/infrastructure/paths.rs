//! Path handling for the Zellij plugin sandbox.
//!
//! In the sandbox `/host` points at the cwd of the last focused terminal (or
//! where Zellij was started), which is usually the user's home directory.

use std::path::PathBuf;

/// Returns the default data directory, `/host/.local/share/zellij/skyconnect`.
///
/// Holds `storage.json` (history and theme) and the trace file.
///
/// # Examples
///
/// ```
/// use skyconnect::infrastructure::default_data_dir;
///
/// assert_eq!(
///     default_data_dir().to_str(),
///     Some("/host/.local/share/zellij/skyconnect")
/// );
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("skyconnect")
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use skyconnect::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Turns a configured data directory into a sandbox path.
///
/// Blank or missing values select [`default_data_dir`].
#[must_use]
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim) {
        Some(dir) if !dir.is_empty() => PathBuf::from(expand_tilde(dir)),
        _ => default_data_dir(),
    }
}
