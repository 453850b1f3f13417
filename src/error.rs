use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("pubspec.yaml parsing failed: {0}")]
    ManifestParsing(String),

    #[error("pubspec.yaml update failed: {0}")]
    ManifestUpdate(String),

    #[error("Package registry error: {0}")]
    Registry(String),

    #[error("{0} dependency update(s) failed")]
    UpdatesFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
