//! Error types for rule generation

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole generation run.
#[derive(Debug, Error)]
pub enum GenconfError {
    #[error("unable to scan {}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("unable to write {destination}")]
    Sink {
        destination: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to add a lang: {0}")]
    InvalidLanguage(String),
    #[error("invalid generic family: {0}")]
    InvalidGenericFamily(String),
}

/// Why a single scanned font contributed nothing to the output.
///
/// These never abort generation; they are collected into the report and
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no file object in the font metadata")]
    MissingPath,
    #[error("{}: no family object in the font metadata", path.display())]
    MissingFamily { path: PathBuf },
    #[error(
        "{}: unable to determine generic family for \"{family}\" from either the font or the request",
        path.display()
    )]
    UnresolvableGenericFamily { family: String, path: PathBuf },
}

/// A skipped record together with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFont {
    pub path: PathBuf,
    pub reason: SkipReason,
}
