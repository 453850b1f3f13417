use crate::error::Result;
use std::thread;
use tracing::warn;

pub mod pub_dev;
pub use pub_dev::PubDevClient;

/// Source of the latest published version of a package.
pub trait VersionSource: Send + Sync {
    /// Latest version of `package`, `None` when the package is unknown or unreachable.
    fn latest_version(&self, package: &str) -> Result<Option<String>>;
}

/// Look up every package concurrently, one fetch per name.
///
/// The result lines up with `packages`. A failed or empty lookup becomes an empty string
/// and never affects the other lookups.
pub fn resolve_latest_versions(source: &dyn VersionSource, packages: &[&str]) -> Vec<String> {
    thread::scope(|scope| {
        let handles: Vec<_> = packages
            .iter()
            .map(|package| scope.spawn(move || lookup(source, package)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_default())
            .collect()
    })
}

fn lookup(source: &dyn VersionSource, package: &str) -> String {
    match source.latest_version(package) {
        Ok(Some(version)) => version,
        Ok(None) => String::new(),
        Err(e) => {
            warn!("Could not resolve latest version of {}: {}", package, e);
            String::new()
        }
    }
}
