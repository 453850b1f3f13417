use crate::error::{AdvisorError, Result};
use std::path::{Path, PathBuf};

const FORBIDDEN: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// Path checks applied before anything under a project is read or rewritten.
pub struct PathValidator;

impl PathValidator {
    /// Canonicalises a project directory and refuses system locations.
    pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            AdvisorError::ProjectValidation(format!(
                "Cannot open project '{}': {e}",
                path.display()
            ))
        })?;

        if !canonical.is_dir() {
            return Err(AdvisorError::ProjectValidation(format!(
                "'{}' is not a directory",
                canonical.display()
            )));
        }

        if let Some(forbidden) = Self::forbidden_root(&canonical) {
            return Err(AdvisorError::ProjectValidation(format!(
                "Refusing to inspect system directory '{forbidden}'"
            )));
        }

        Ok(canonical)
    }

    /// Canonicalises `file_path` and requires it to stay inside `base_dir`.
    pub fn validate_file_path(
        file_path: impl AsRef<Path>,
        base_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let file_path = file_path.as_ref();
        let base_dir = base_dir.as_ref();

        let canonical_file = file_path.canonicalize().map_err(|e| {
            AdvisorError::ProjectValidation(format!(
                "Cannot open '{}': {e}",
                file_path.display()
            ))
        })?;
        let canonical_base = base_dir.canonicalize().map_err(|e| {
            AdvisorError::ProjectValidation(format!(
                "Cannot open project '{}': {e}",
                base_dir.display()
            ))
        })?;

        if !canonical_file.starts_with(&canonical_base) {
            return Err(AdvisorError::ProjectValidation(format!(
                "'{}' resolves outside the project directory",
                file_path.display()
            )));
        }

        Ok(canonical_file)
    }

    fn forbidden_root(canonical: &Path) -> Option<&'static str> {
        FORBIDDEN.iter().copied().find(|root| {
            let root_path = Path::new(root);
            canonical.starts_with(root_path)
                || root_path
                    .canonicalize()
                    .is_ok_and(|resolved| canonical.starts_with(resolved))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn accepts_project_directory() {
        let dir = tempdir().unwrap();
        let canonical = PathValidator::validate_project_path(dir.path()).unwrap();
        assert_eq!(canonical, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn rejects_manifest_given_as_project() {
        let dir = tempdir().unwrap();
        let pubspec = dir.path().join("pubspec.yaml");
        fs::write(&pubspec, "name: app\n").unwrap();

        let err = PathValidator::validate_project_path(&pubspec).unwrap_err();
        assert!(matches!(err, AdvisorError::ProjectValidation(_)));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_system_directory() {
        assert!(PathValidator::validate_project_path("/etc").is_err());
    }

    #[test]
    fn accepts_manifest_inside_project() {
        let dir = tempdir().unwrap();
        let pubspec = dir.path().join("pubspec.yaml");
        fs::write(&pubspec, "name: app\n").unwrap();

        assert!(PathValidator::validate_file_path(&pubspec, dir.path()).is_ok());
    }

    #[test]
    fn rejects_manifest_outside_project() {
        let project = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let pubspec = elsewhere.path().join("pubspec.yaml");
        fs::write(&pubspec, "name: other\n").unwrap();

        assert!(PathValidator::validate_file_path(&pubspec, project.path()).is_err());
    }
}
