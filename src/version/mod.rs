//! Version comparison for installed releases
//!
//! - `semver`: lenient chart version parsing and constraint checks
//! - `resolver`: latest version lookup and up-to-date classification
//! - `matcher`: pairs releases with the indices that publish them

pub mod matcher;
pub mod resolver;
pub mod semver;

pub use matcher::match_releases;
pub use resolver::{ChartVersionInfo, ReleaseStatus, resolve_latest};
