//! Path utilities for locating the configuration file.
//!
//! Configuration lives in `.taskdeck/config.yaml` under a project directory,
//! falling back to the same location under the user's home directory.

use crate::config::CONFIG_FILE_PATH;
use std::path::{Path, PathBuf};

/// Get the config file path under a base directory.
#[must_use]
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILE_PATH)
}

/// Get the config file path under the user's home directory.
///
/// Returns `None` if the home directory cannot be determined.
#[must_use]
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| config_path(&home))
}

/// Find the config file to use for a project.
///
/// Prefers the project's own file, then the home directory's. Returns
/// `None` if neither exists.
#[must_use]
pub fn resolve_config_path(project_dir: &Path) -> Option<PathBuf> {
    resolve_config_path_in(project_dir, home_config_path().as_deref())
}

fn resolve_config_path_in(project_dir: &Path, home_config: Option<&Path>) -> Option<PathBuf> {
    let project_config = config_path(project_dir);
    if project_config.exists() {
        return Some(project_config);
    }
    home_config.filter(|path| path.exists()).map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch_config(base: &Path) -> PathBuf {
        let path = config_path(base);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{}").unwrap();
        path
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            config_path(Path::new("/project")),
            PathBuf::from("/project/.taskdeck/config.yaml")
        );
    }

    #[test]
    fn test_project_config_preferred() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let project_file = touch_config(project.path());
        let home_file = touch_config(home.path());

        assert_eq!(resolve_config_path_in(project.path(), Some(&home_file)), Some(project_file));
    }

    #[test]
    fn test_falls_back_to_home_config() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let home_file = touch_config(home.path());

        assert_eq!(resolve_config_path_in(project.path(), Some(&home_file)), Some(home_file));
    }

    #[test]
    fn test_no_config_anywhere() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let missing = config_path(home.path());

        assert_eq!(resolve_config_path_in(project.path(), Some(&missing)), None);
        assert_eq!(resolve_config_path_in(project.path(), None), None);
    }
}
