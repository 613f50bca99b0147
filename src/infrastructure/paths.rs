//! Sandbox path helpers.

use std::path::{Path, PathBuf};

/// File holding the favorites store inside the data directory.
pub const FAVORITES_FILE: &str = "favorites.json";

/// Default data directory: `/host/.local/share/zellij/zcountries`.
///
/// `/host` points at the directory Zellij was started from, which is usually
/// the home directory, so this normally lands in
/// `~/.local/share/zellij/zcountries`.
///
/// ```
/// use zcountries::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zcountries"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zcountries")
}

/// Path of the favorites file under `data_dir`.
#[must_use]
pub fn favorites_file(data_dir: &Path) -> PathBuf {
    data_dir.join(FAVORITES_FILE)
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// ```
/// use zcountries::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/zcountries"), "/tmp/zcountries");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
