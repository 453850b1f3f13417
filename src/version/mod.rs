pub mod constraint;

pub use constraint::{min_version_or_zero, satisfies_required};
