use crate::error::{AdvisorError, Result};
use crate::utils::path_validator::PathValidator;
use std::path::{Path, PathBuf};
use tracing::debug;

const MANIFEST_FILE: &str = "pubspec.yaml";

/// ProjectScannerAgent locates the manifest of a Dart or Flutter project
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the project directory and returns where its pubspec.yaml lives
    pub fn validate(&self) -> Result<ProjectInfo> {
        let project_path = PathValidator::validate_project_path(&self.project_path)?;

        let candidate = project_path.join(MANIFEST_FILE);
        if !candidate.is_file() {
            return Err(AdvisorError::ProjectValidation(format!(
                "{} not found in {}",
                MANIFEST_FILE,
                project_path.display()
            )));
        }

        // Symlinked manifests must still resolve inside the project.
        let pubspec_path = PathValidator::validate_file_path(&candidate, &project_path)?;
        debug!("Using manifest {}", pubspec_path.display());

        Ok(ProjectInfo {
            project_path,
            pubspec_path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub pubspec_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_pubspec_at_project_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pubspec.yaml"), "name: app\n").unwrap();

        let info = ProjectScannerAgent::new(dir.path()).validate().unwrap();
        assert!(info.pubspec_path.ends_with("pubspec.yaml"));
        assert_eq!(info.project_path, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn rejects_project_without_pubspec() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pubspec.lock"), "").unwrap();

        let err = ProjectScannerAgent::new(dir.path()).validate().unwrap_err();
        assert!(
            matches!(err, AdvisorError::ProjectValidation(msg) if msg.contains("pubspec.yaml"))
        );
    }

    #[test]
    fn rejects_pubspec_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pubspec.yaml")).unwrap();

        assert!(ProjectScannerAgent::new(dir.path()).validate().is_err());
    }

    #[test]
    fn rejects_missing_project_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(ProjectScannerAgent::new(missing).validate().is_err());
    }
}
