pub mod browser;
pub mod interaction;
pub mod project_scanner;
pub mod upgrade_advisor;
pub mod watched;

pub use browser::SystemBrowser;
pub use interaction::{SilentPrompt, TerminalPrompt};
pub use project_scanner::ProjectScannerAgent;
pub use upgrade_advisor::{Advisory, AdvisoryReport, Evaluation, UpgradeAdvisor};
pub use watched::WatchedPackage;
