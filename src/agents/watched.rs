use crate::agents::browser::LinkOpener;
use std::fmt;
use tracing::warn;
use url::Url;

const BLOC_MIGRATION_GUIDE: &str = "https://bloclibrary.dev/#/migration";
const EQUATABLE_MIGRATION_GUIDE: &str =
    "https://github.com/felangel/equatable/blob/master/doc/migration_guides/migration-0.6.0.md";

/// Follow-up a user can pick from an advisory besides updating the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationAction {
    OpenBlocMigrationGuide,
    OpenEquatableMigrationGuide,
}

impl RemediationAction {
    pub fn label(&self) -> &'static str {
        match self {
            RemediationAction::OpenBlocMigrationGuide
            | RemediationAction::OpenEquatableMigrationGuide => "Open Migration Guide",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            RemediationAction::OpenBlocMigrationGuide => BLOC_MIGRATION_GUIDE,
            RemediationAction::OpenEquatableMigrationGuide => EQUATABLE_MIGRATION_GUIDE,
        }
    }

    /// Run the action. Failures are logged and otherwise ignored.
    pub fn perform(&self, opener: &dyn LinkOpener) {
        match Url::parse(self.url()) {
            Ok(url) => {
                if let Err(e) = opener.open(&url) {
                    warn!("Could not open {}: {}", url, e);
                }
            }
            Err(e) => warn!("Invalid migration guide URL {}: {}", self.url(), e),
        }
    }
}

impl fmt::Display for RemediationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of a package that ships a migration guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchedSpec {
    pub name: &'static str,
    pub actions: &'static [RemediationAction],
}

const BLOC_GUIDE: &[RemediationAction] = &[RemediationAction::OpenBlocMigrationGuide];
const EQUATABLE_GUIDE: &[RemediationAction] = &[RemediationAction::OpenEquatableMigrationGuide];

/// Packages checked against `dependencies`.
pub const RUNTIME_PACKAGES: &[WatchedSpec] = &[
    WatchedSpec {
        name: "angular_bloc",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "bloc",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "bloc_concurrency",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "equatable",
        actions: EQUATABLE_GUIDE,
    },
    WatchedSpec {
        name: "flutter_bloc",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "hydrated_bloc",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "replay_bloc",
        actions: BLOC_GUIDE,
    },
    WatchedSpec {
        name: "sealed_flutter_bloc",
        actions: BLOC_GUIDE,
    },
];

/// Packages checked against `dev_dependencies`.
pub const DEV_PACKAGES: &[WatchedSpec] = &[WatchedSpec {
    name: "bloc_test",
    actions: BLOC_GUIDE,
}];

/// A watched package paired with the latest version fetched for this run.
///
/// An empty `required_version` means the lookup failed and the package is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedPackage {
    pub name: String,
    pub required_version: String,
    pub actions: Vec<RemediationAction>,
}

impl WatchedPackage {
    pub fn from_spec(spec: &WatchedSpec, required_version: String) -> Self {
        Self {
            name: spec.name.to_string(),
            required_version,
            actions: spec.actions.to_vec(),
        }
    }
}
