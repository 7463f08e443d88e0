//! Generator configuration.

use std::path::PathBuf;

use variantc_registry::resolve::ResolveOptions;

/// Conventional location of the variant configuration, relative to the
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "mitsuba.conf";

/// Conventional location of the generated header.
pub const DEFAULT_OUTPUT_PATH: &str = "include/mitsuba/core/config.h";

/// Where to read the variant configuration, where to write the header, and
/// how strictly to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// JSON variant configuration to read.
    pub config_path: PathBuf,
    /// Header to generate.
    pub output_path: PathBuf,
    /// Fail when `default` names a variant that is not enabled.
    pub strict_default: bool,
}

impl Default for GeneratorConfig {
    /// Defaults to the conventional paths with permissive default handling.
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            strict_default: false,
        }
    }
}

impl GeneratorConfig {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            strict_default: self.strict_default,
        }
    }
}
