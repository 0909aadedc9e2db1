//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is reachable under `/host`, which
//! usually resolves to the user's home directory. Paths typed by the user are
//! mapped into the sandbox before use and mapped back for display.

use std::path::{Path, PathBuf};

/// Returns the plugin's data directory, `/host/.local/share/zellij/memories`.
///
/// Holds the trace log files and staged request bodies.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("memories")
}

/// Where the body of request `request_id` is staged for curl.
///
/// Several plugin instances share the data directory, so the plugin id is
/// part of the name.
///
/// ```
/// use memories::infrastructure::request_body_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     request_body_path(4, 17),
///     PathBuf::from("/host/.local/share/zellij/memories/requests/4-17.json")
/// );
/// ```
#[must_use]
pub fn request_body_path(plugin_id: u32, request_id: u64) -> PathBuf {
    get_data_dir().join("requests").join(format!("{plugin_id}-{request_id}.json"))
}

/// Maps a sandbox path to the path a host command sees.
///
/// Host commands run in the directory mounted at `/host`, so paths below it
/// become relative. Other paths are returned unchanged.
///
/// ```
/// use memories::infrastructure::host_command_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(host_command_path(Path::new("/host/.local/a.json")), PathBuf::from(".local/a.json"));
/// assert_eq!(host_command_path(Path::new("/tmp/a.json")), PathBuf::from("/tmp/a.json"));
/// ```
#[must_use]
pub fn host_command_path(path: &Path) -> PathBuf {
    path.strip_prefix("/host").map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use memories::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/pictures"), "/host/pictures");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
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

/// Maps a user-typed path to the sandbox path to open.
///
/// Surrounding whitespace is ignored. `~` paths go through [`expand_tilde`],
/// relative paths are taken relative to `/host`, absolute paths are kept.
///
/// # Examples
///
/// ```
/// use memories::infrastructure::resolve_host_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_host_path(" ~/a.png "), PathBuf::from("/host/a.png"));
/// assert_eq!(resolve_host_path("pics/a.png"), PathBuf::from("/host/pics/a.png"));
/// assert_eq!(resolve_host_path("/tmp/a.png"), PathBuf::from("/tmp/a.png"));
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_tilde(path.trim()));
    if expanded.is_absolute() {
        expanded
    } else {
        PathBuf::from("/host").join(expanded)
    }
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// # Examples
///
/// ```
/// use memories::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/pictures/a.png"), "/pictures/a.png");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}
