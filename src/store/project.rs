//! Project discovery - locating the `.inspectflow/` data directory
//!
//! Commands run from anywhere inside a project tree; discovery walks up
//! from the working directory until it finds the marker directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Marker/data directory at the project root
pub const PROJECT_DIR: &str = ".inspectflow";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not inside an inspectflow project (run 'inspectflow init' first)")]
    NotFound,

    #[error("project already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An initialized project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Initialize a new project in `dir`, creating the data directories
    pub fn init(dir: &Path) -> Result<Self, ProjectError> {
        let data = dir.join(PROJECT_DIR);
        if data.exists() {
            return Err(ProjectError::AlreadyInitialized(dir.to_path_buf()));
        }
        std::fs::create_dir_all(data.join("orders"))?;
        std::fs::create_dir_all(data.join("gauges"))?;
        std::fs::create_dir_all(data.join("reports"))?;
        Ok(Self {
            root: dir.to_path_buf(),
        })
    }

    /// Discover the project containing the current working directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Discover the project containing `start`, walking up the tree
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = Some(start);
        while let Some(candidate) = dir {
            if candidate.join(PROJECT_DIR).is_dir() {
                return Ok(Self {
                    root: candidate.to_path_buf(),
                });
            }
            dir = candidate.parent();
        }
        Err(ProjectError::NotFound)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn orders_dir(&self) -> PathBuf {
        self.data_dir().join("orders")
    }

    pub fn gauges_dir(&self) -> PathBuf {
        self.data_dir().join("gauges")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir().join("reports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_layout() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        assert!(project.orders_dir().is_dir());
        assert!(project.gauges_dir().is_dir());
        assert!(project.reports_dir().is_dir());
    }

    #[test]
    fn test_init_twice_fails() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();
        assert!(matches!(
            Project::init(tmp.path()),
            Err(ProjectError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let project = Project::discover_from(&nested).unwrap();
        assert_eq!(project.root(), tmp.path());
    }

    #[test]
    fn test_discover_outside_project_fails() {
        let tmp = tempdir().unwrap();
        assert!(matches!(
            Project::discover_from(tmp.path()),
            Err(ProjectError::NotFound)
        ));
    }
}
