pub mod editor;
pub mod parser;

pub use editor::{DependencyUpdate, ManifestUpdater, PubspecEditor};
pub use parser::{
    DeclaredConstraint, DependencySection, DependencySet, ManifestReader, Pubspec, PubspecFile,
};
