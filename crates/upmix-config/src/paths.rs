//! Where user presets live.
//!
//! Saved presets are TOML files under the platform config directory, in
//! `upmix/presets/`. When no config directory is known the relative path
//! `./upmix/presets` is used.
//!
//! ```rust,no_run
//! use upmix_config::paths;
//!
//! for path in paths::list_user_presets() {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR: &str = "upmix";
const PRESETS_DIR: &str = "presets";
const PRESET_EXT: &str = "toml";

/// Directory holding user presets. It may not exist yet.
pub fn user_presets_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR).join(PRESETS_DIR)
}

/// Creates [`user_presets_dir`] if needed and returns it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Resolves `name` to an existing preset file.
///
/// An existing file path wins. Otherwise `name` is looked up in the user
/// presets directory, with `.toml` appended when missing.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    resolve_in(name, &user_presets_dir())
}

fn resolve_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }

    let candidate = if has_preset_ext(Path::new(name)) {
        dir.join(name)
    } else {
        dir.join(format!("{name}.{PRESET_EXT}"))
    };
    candidate.is_file().then_some(candidate)
}

fn has_preset_ext(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PRESET_EXT)
}

/// Preset files in the user directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    presets_in(&user_presets_dir())
}

fn presets_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_preset_ext(path))
        .collect();
    found.sort();
    found
}

/// Preset name for a file: its stem.
///
/// ```rust
/// use std::path::Path;
/// use upmix_config::paths::preset_name_from_path;
///
/// assert_eq!(
///     preset_name_from_path(Path::new("/home/me/.config/upmix/presets/cinema.toml")),
///     Some("cinema".to_string())
/// );
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()?.to_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn presets_dir_ends_in_app_subdir() {
        assert!(user_presets_dir().ends_with(Path::new("upmix/presets")));
    }

    #[test]
    fn existing_path_is_used_as_is() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("living-room.toml");
        fs::write(&file, "name = \"Living Room\"").unwrap();

        assert_eq!(find_preset(file.to_str().unwrap()), Some(file));
    }

    #[test]
    fn bare_names_resolve_inside_dir() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("mine.toml");
        fs::write(&file, "").unwrap();

        assert_eq!(resolve_in("mine", temp.path()), Some(file.clone()));
        assert_eq!(resolve_in("mine.toml", temp.path()), Some(file));
        assert_eq!(resolve_in("theirs", temp.path()), None);
    }

    #[test]
    fn dotted_names_keep_their_stem() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("7.1 film.toml");
        fs::write(&file, "").unwrap();

        assert_eq!(resolve_in("7.1 film", temp.path()), Some(file.clone()));
        assert_eq!(resolve_in("7.1 film.toml", temp.path()), Some(file));
    }

    #[test]
    fn listing_skips_other_files() {
        let temp = TempDir::new().unwrap();
        for name in ["wide.toml", "cinema.toml", "readme.txt"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        fs::create_dir(temp.path().join("old.toml")).unwrap();

        let names: Vec<String> = presets_in(temp.path())
            .iter()
            .filter_map(|p| preset_name_from_path(p))
            .collect();
        assert_eq!(names, ["cinema", "wide"]);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        assert!(presets_in(Path::new("/nonexistent/upmix/presets")).is_empty());
    }
}
