use std::path::PathBuf;

/// Returns the user's home directory, if the environment names one
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Returns the user's home directory, if the environment names one
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Expand a leading `~` to the home directory.
///
/// Only `~` on its own and `~/...` are expanded; `~user/...` and paths without a
/// leading tilde are returned unchanged, as is everything when no home
/// directory is known.
pub fn expand_path(path: &str) -> PathBuf {
  let rest = match path.strip_prefix('~') {
    Some("") => "",
    Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => &rest[1..],
    _ => return PathBuf::from(path),
  };

  match home_dir() {
    Some(home) if rest.is_empty() => home,
    Some(home) => home.join(rest),
    None => PathBuf::from(path),
  }
}
