use crate::error::{AdvisorError, Result};
use crate::pubspec::parser::{DependencyEntry, DependencySection, Pubspec, PubspecParser};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Request to rewrite one declared constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUpdate {
    pub section: DependencySection,
    pub name: String,
    pub latest_version: String,
    pub current_version: String,
}

/// Persists constraint changes to a manifest.
pub trait ManifestUpdater: Send + Sync {
    fn update_dependency(&self, update: &DependencyUpdate) -> Result<()>;
}

/// Rewrites constraints inside pubspec.yaml, leaving every other byte untouched.
pub struct PubspecEditor {
    pubspec_path: PathBuf,
}

impl PubspecEditor {
    pub fn new<P: AsRef<Path>>(pubspec_path: P) -> Self {
        Self {
            pubspec_path: pubspec_path.as_ref().to_path_buf(),
        }
    }

    /// Apply `update` to manifest `content`, returning the rewritten text.
    pub fn apply(content: &str, update: &DependencyUpdate) -> Result<String> {
        let pubspec = PubspecParser::parse(content)?;
        let entry = find_entry(&pubspec, update).ok_or_else(|| {
            AdvisorError::ManifestUpdate(format!(
                "'{}: {}' not found under {} in pubspec.yaml",
                update.name,
                update.current_version,
                update.section.key()
            ))
        })?;

        let span = entry.span.clone().ok_or_else(|| {
            AdvisorError::ManifestUpdate(format!(
                "Constraint for '{}' cannot be rewritten",
                update.name
            ))
        })?;

        let mut updated = String::with_capacity(content.len() + update.latest_version.len());
        updated.push_str(&content[..span.start]);
        updated.push_str(&update.latest_version);
        updated.push_str(&content[span.end..]);
        Ok(updated)
    }
}

impl ManifestUpdater for PubspecEditor {
    fn update_dependency(&self, update: &DependencyUpdate) -> Result<()> {
        let content = fs::read_to_string(&self.pubspec_path).map_err(|e| {
            AdvisorError::ManifestUpdate(format!("Failed to read pubspec.yaml: {}", e))
        })?;

        let updated = Self::apply(&content, update)?;

        fs::write(&self.pubspec_path, updated).map_err(|e| {
            AdvisorError::ManifestUpdate(format!("Failed to write pubspec.yaml: {}", e))
        })?;

        debug!(
            package = %update.name,
            from = %update.current_version,
            to = %update.latest_version,
            "pubspec.yaml updated"
        );
        Ok(())
    }
}

/// Only the section the update targets is searched, so a package declared under both keys
/// is rewritten where it was flagged.
fn find_entry<'a>(pubspec: &'a Pubspec, update: &DependencyUpdate) -> Option<&'a DependencyEntry> {
    pubspec.section(update.section).iter().find(|entry| {
        entry.name == update.name
            && entry.constraint.as_text() == Some(update.current_version.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBSPEC: &str = "name: app\n\ndependencies:\n  bloc: ^8.0.0 # state\n  flutter_bloc: \"^8.0.0\"\n\ndev_dependencies:\n  bloc_test: '^8.0.0'\n";

    fn update(name: &str, latest: &str, current: &str) -> DependencyUpdate {
        DependencyUpdate {
            section: DependencySection::Dependencies,
            name: name.to_string(),
            latest_version: latest.to_string(),
            current_version: current.to_string(),
        }
    }

    fn dev_update(name: &str, latest: &str, current: &str) -> DependencyUpdate {
        DependencyUpdate {
            section: DependencySection::DevDependencies,
            ..update(name, latest, current)
        }
    }

    #[test]
    fn rewrites_only_the_named_dependency() {
        let updated = PubspecEditor::apply(PUBSPEC, &update("bloc", "^9.1.0", "^8.0.0")).unwrap();
        assert!(updated.contains("  bloc: ^9.1.0 # state\n"));
        assert!(updated.contains("  flutter_bloc: \"^8.0.0\"\n"));
        assert!(updated.contains("  bloc_test: '^8.0.0'\n"));
    }

    #[test]
    fn keeps_quotes_around_constraint() {
        let updated =
            PubspecEditor::apply(PUBSPEC, &update("flutter_bloc", "^9.1.0", "^8.0.0")).unwrap();
        assert!(updated.contains("  flutter_bloc: \"^9.1.0\"\n"));

        let updated =
            PubspecEditor::apply(PUBSPEC, &dev_update("bloc_test", "^10.0.0", "^8.0.0")).unwrap();
        assert!(updated.contains("  bloc_test: '^10.0.0'\n"));
    }

    #[test]
    fn rejects_stale_current_version() {
        let err = PubspecEditor::apply(PUBSPEC, &update("bloc", "^9.1.0", "^7.0.0")).unwrap_err();
        assert!(matches!(err, AdvisorError::ManifestUpdate(_)));
    }

    #[test]
    fn searches_only_the_targeted_section() {
        let both = "name: app\n\
                    dependencies:\n  \
                      bloc_test: ^9.0.0\n\
                    dev_dependencies:\n  \
                      bloc_test: ^9.0.0\n";

        let updated =
            PubspecEditor::apply(both, &dev_update("bloc_test", "^10.0.0", "^9.0.0")).unwrap();
        assert_eq!(
            updated,
            "name: app\ndependencies:\n  bloc_test: ^9.0.0\n\
             dev_dependencies:\n  bloc_test: ^10.0.0\n"
        );

        let err = PubspecEditor::apply(PUBSPEC, &update("bloc_test", "^10.0.0", "^8.0.0"))
            .unwrap_err();
        assert!(matches!(err, AdvisorError::ManifestUpdate(_)));
    }

    #[test]
    fn replaces_alias_without_touching_anchor() {
        let content = "shared: &v ^8.0.0\ndependencies:\n  bloc: *v\n  flutter_bloc: *v\n";
        let updated = PubspecEditor::apply(content, &update("bloc", "^9.1.0", "^8.0.0")).unwrap();
        assert_eq!(
            updated,
            "shared: &v ^8.0.0\ndependencies:\n  bloc: ^9.1.0\n  flutter_bloc: *v\n"
        );
    }

    #[test]
    fn replaces_block_scalar_with_plain_constraint() {
        let content = "dependencies:\n  bloc: >-\n    ^8.0.0\n  meta: ^1.0.0\n";
        let updated = PubspecEditor::apply(content, &update("bloc", "^9.1.0", "^8.0.0")).unwrap();
        assert_eq!(updated, "dependencies:\n  bloc: ^9.1.0\n  meta: ^1.0.0\n");
    }

    #[test]
    fn writes_changes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pubspec.yaml");
        fs::write(&path, PUBSPEC).unwrap();

        let editor = PubspecEditor::new(&path);
        editor
            .update_dependency(&update("bloc", "^9.1.0", "^8.0.0"))
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("  bloc: ^9.1.0 # state\n"));
    }
}
