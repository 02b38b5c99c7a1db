use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub(crate) fn default_style_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "sheetgraph")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("style.json");
    Some(path)
}

/// Style file to use: the explicit one, else the user's `style.json` when it
/// exists.
pub(crate) fn style_override_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_style_path().filter(|path| path.is_file())
}
