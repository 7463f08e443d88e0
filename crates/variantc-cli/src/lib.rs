//! Variantc CLI -- File plumbing around the variant compiler.
//!
//! The library half of the `variantc` binary. It reads the JSON
//! configuration named by a [`GeneratorConfig`], runs it through
//! [`variantc_registry`] and [`variantc_emit`], and writes (or checks) the
//! generated header.
//!
//! # Pipeline
//!
//! 1. [`load_registry`] -- read and parse the configuration file.
//! 2. [`resolve_config`] -- load + resolve with the configured strictness.
//! 3. [`generate`] -- render and write the header if it changed.
//! 4. [`check`] -- render and compare against the header on disk.

#![deny(unsafe_code)]

pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use variantc_emit::writer::{digest, existing_digest, render, write_if_changed, WriteOutcome};
use variantc_registry::registry::VariantRegistry;
use variantc_registry::resolve::{resolve_with, ResolvedVariants};

pub use config::GeneratorConfig;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Summary of a [`generate`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// The header path that was written or left in place.
    pub output_path: PathBuf,
    pub outcome: WriteOutcome,
    /// Number of emitted variants (duplicates counted).
    pub variant_count: usize,
    pub default_mode: String,
    /// BLAKE3 hex digest of the header contents.
    pub digest: String,
}

/// Read and parse the configuration file into a registry.
pub fn load_registry(path: &Path) -> Result<VariantRegistry> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    VariantRegistry::load(&raw)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Load and resolve the configuration named by `config`.
pub fn resolve_config(config: &GeneratorConfig) -> Result<ResolvedVariants> {
    let registry = load_registry(&config.config_path)?;
    resolve_with(&registry, config.resolve_options())
        .with_context(|| format!("invalid configuration in {}", config.config_path.display()))
}

/// Generate the header, writing it only if its contents changed.
pub fn generate(config: &GeneratorConfig) -> Result<Generation> {
    info!(config = %config.config_path.display(), "reading variant configuration");
    let resolved = resolve_config(config)?;
    let header = render(&resolved);
    let outcome = write_if_changed(&config.output_path, &header)?;

    Ok(Generation {
        output_path: config.output_path.clone(),
        outcome,
        variant_count: resolved.len(),
        default_mode: resolved.default_mode().to_owned(),
        digest: digest(&header),
    })
}

/// Returns `true` if the header on disk matches what would be generated.
pub fn check(config: &GeneratorConfig) -> Result<bool> {
    let resolved = resolve_config(config)?;
    let wanted = digest(&render(&resolved));
    Ok(existing_digest(&config.output_path)?.as_deref() == Some(wanted.as_str()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
