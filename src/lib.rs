//! helm-whatup library
//!
//! This library provides the core functionality for the helm-whatup CLI:
//! reading installed releases, loading cached repository indices, comparing
//! chart versions and rendering the report. It can be used both as a binary
//! and as a library for testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod pipeline;
pub mod release;
pub mod repo;
pub mod report;
pub mod version;

// Re-export commonly used types for convenience
pub use config::{ReportOptions, Settings};
pub use error::{WhatupError, WhatupResult};
pub use release::{InstalledRelease, ReleaseSource};
pub use repo::{IndexSource, RepositoryIndex};
pub use report::OutputFormat;
pub use version::{ChartVersionInfo, ReleaseStatus};
