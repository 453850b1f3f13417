use crate::agents::browser::LinkOpener;
use crate::agents::interaction::{Prompt, UPDATE_LABEL};
use crate::agents::watched::{
    DEV_PACKAGES, RUNTIME_PACKAGES, RemediationAction, WatchedPackage, WatchedSpec,
};
use crate::error::Result;
use crate::pubspec::{
    DeclaredConstraint, DependencySection, DependencySet, DependencyUpdate, ManifestReader,
    ManifestUpdater, Pubspec,
};
use crate::registry::{VersionSource, resolve_latest_versions};
use crate::version::{min_version_or_zero, satisfies_required};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, warn};

/// A watched package whose declared constraint lags behind the latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub section: DependencySection,
    pub package_name: String,
    pub required_version: String,
    pub declared_constraint: String,
    pub actions: Vec<RemediationAction>,
}

impl Advisory {
    pub fn message(&self) -> String {
        format!(
            "This workspace contains an outdated version of {}. Please update to {}.",
            self.package_name, self.required_version
        )
    }

    /// Remediation labels in table order, then "Update".
    pub fn offered_labels(&self) -> Vec<&'static str> {
        self.actions
            .iter()
            .map(|action| action.label())
            .chain(std::iter::once(UPDATE_LABEL))
            .collect()
    }

    pub fn update_request(&self) -> DependencyUpdate {
        DependencyUpdate {
            section: self.section,
            name: self.package_name.clone(),
            latest_version: format!("^{}", self.required_version),
            current_version: self.declared_constraint.clone(),
        }
    }

    fn action_for(&self, label: &str) -> Option<RemediationAction> {
        self.actions
            .iter()
            .copied()
            .find(|action| action.label() == label)
    }
}

/// Outcome of a single advisory once the user has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Dismissed,
    Updated,
    Action(RemediationAction),
}

/// Watched tables with their fetched versions and the manifest they were checked against.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub runtime: Vec<WatchedPackage>,
    pub dev: Vec<WatchedPackage>,
    pub pubspec: Pubspec,
    pub advisories: Vec<Advisory>,
}

/// What happened to every advisory in a run.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryReport {
    pub updated: Vec<(String, String, String)>,
    pub actions: Vec<(String, RemediationAction)>,
    pub dismissed: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl AdvisoryReport {
    pub fn total(&self) -> usize {
        self.updated.len() + self.actions.len() + self.dismissed.len() + self.failed.len()
    }
}

/// Decide which watched packages in `table` need an advisory against `dependencies`.
///
/// Entries are visited in table order. A package is flagged only when its latest version is
/// known, it is declared with a text constraint other than `latest` or `any`, and the lowest
/// version that constraint admits is not exactly the latest version.
pub fn check_for_upgrades(
    table: &[WatchedPackage],
    dependencies: &DependencySet,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    for package in table {
        if package.required_version.trim().is_empty() {
            continue;
        }

        let Some(declared) = dependencies.get(&package.name) else {
            continue;
        };

        let constraint = match declared {
            DeclaredConstraint::Text(text) => text.as_str(),
            DeclaredConstraint::Null | DeclaredConstraint::Opaque => continue,
        };
        if constraint == "latest" || constraint == "any" {
            continue;
        }

        let min_version = min_version_or_zero(constraint);
        if satisfies_required(&min_version, &package.required_version) {
            debug!(
                package = %package.name,
                constraint,
                latest = %package.required_version,
                "constraint is current"
            );
            continue;
        }

        debug!(
            package = %package.name,
            constraint,
            %min_version,
            latest = %package.required_version,
            "constraint is outdated"
        );
        advisories.push(Advisory {
            section: dependencies.section(),
            package_name: package.name.clone(),
            required_version: package.required_version.clone(),
            declared_constraint: constraint.to_string(),
            actions: package.actions.clone(),
        });
    }

    advisories
}

/// Runs the whole check: fetch versions, read the manifest, flag and resolve advisories.
pub struct UpgradeAdvisor {
    version_source: Arc<dyn VersionSource>,
    manifest: Arc<dyn ManifestReader>,
    updater: Arc<dyn ManifestUpdater>,
    opener: Arc<dyn LinkOpener>,
}

impl UpgradeAdvisor {
    pub fn new(
        version_source: Arc<dyn VersionSource>,
        manifest: Arc<dyn ManifestReader>,
        updater: Arc<dyn ManifestUpdater>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            version_source,
            manifest,
            updater,
            opener,
        }
    }

    /// Evaluate the built-in watched tables.
    pub fn evaluate(&self) -> Evaluation {
        self.evaluate_tables(RUNTIME_PACKAGES, DEV_PACKAGES)
    }

    /// Fetch versions for both tables and read the manifest concurrently, then check both
    /// sections. Failures degrade to "nothing to report" for the affected part.
    pub fn evaluate_tables(&self, runtime: &[WatchedSpec], dev: &[WatchedSpec]) -> Evaluation {
        let source = self.version_source.as_ref();
        let manifest = self.manifest.as_ref();

        let (runtime, dev, pubspec) = thread::scope(|scope| {
            let runtime = scope.spawn(|| resolve_table(source, runtime));
            let dev = scope.spawn(|| resolve_table(source, dev));
            let pubspec = scope.spawn(|| manifest.read_manifest());
            (runtime.join(), dev.join(), pubspec.join())
        });

        let runtime = runtime.unwrap_or_default();
        let dev = dev.unwrap_or_default();
        let pubspec = match pubspec {
            Ok(Ok(pubspec)) => pubspec,
            Ok(Err(e)) => {
                warn!("Could not read pubspec.yaml: {}", e);
                Pubspec::default()
            }
            Err(_) => Pubspec::default(),
        };

        let mut advisories = check_for_upgrades(&runtime, &pubspec.dependencies);
        advisories.extend(check_for_upgrades(&dev, &pubspec.dev_dependencies));

        Evaluation {
            runtime,
            dev,
            pubspec,
            advisories,
        }
    }

    /// Show one advisory and carry out the user's choice.
    pub fn resolve(&self, advisory: &Advisory, prompt: &mut dyn Prompt) -> Result<Resolution> {
        let labels = advisory.offered_labels();
        let choice = prompt.choose(&advisory.message(), &labels)?;

        match choice.as_deref() {
            Some(UPDATE_LABEL) => {
                self.updater.update_dependency(&advisory.update_request())?;
                Ok(Resolution::Updated)
            }
            Some(label) => match advisory.action_for(label) {
                Some(action) => {
                    action.perform(self.opener.as_ref());
                    Ok(Resolution::Action(action))
                }
                None => Ok(Resolution::Dismissed),
            },
            None => Ok(Resolution::Dismissed),
        }
    }

    /// Resolve every advisory in order. A failure is recorded and the rest still run.
    pub fn resolve_all(
        &self,
        advisories: &[Advisory],
        prompt: &mut dyn Prompt,
    ) -> AdvisoryReport {
        let mut report = AdvisoryReport::default();

        for advisory in advisories {
            let name = advisory.package_name.clone();
            match self.resolve(advisory, prompt) {
                Ok(Resolution::Updated) => {
                    let request = advisory.update_request();
                    report
                        .updated
                        .push((name, request.current_version, request.latest_version));
                }
                Ok(Resolution::Action(action)) => report.actions.push((name, action)),
                Ok(Resolution::Dismissed) => report.dismissed.push(name),
                Err(e) => {
                    error!("Failed to resolve advisory for {}: {}", name, e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        report
    }

    /// Evaluate and resolve in one go.
    pub fn analyze(&self, prompt: &mut dyn Prompt) -> (Evaluation, AdvisoryReport) {
        let evaluation = self.evaluate();
        let report = self.resolve_all(&evaluation.advisories, prompt);
        (evaluation, report)
    }
}

fn resolve_table(source: &dyn VersionSource, table: &[WatchedSpec]) -> Vec<WatchedPackage> {
    let names: Vec<&str> = table.iter().map(|spec| spec.name).collect();
    let versions = resolve_latest_versions(source, &names);
    table
        .iter()
        .zip(versions)
        .map(|(spec, version)| WatchedPackage::from_spec(spec, version))
        .collect()
}
