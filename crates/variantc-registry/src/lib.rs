//! Variantc Registry -- Variant definitions, validation and resolution.
//!
//! This crate holds the front half of the variant compiler: it turns an
//! already-parsed JSON configuration into a [`VariantRegistry`] and resolves
//! the registry into an ordered, non-empty [`ResolvedVariants`] sequence that
//! the macro emitter consumes.
//!
//! # Modules
//!
//! - [`template`]: [`ColorTemplate`], the color-representation type template
//!   with its `Float` placeholder and the single-pass substitution.
//! - [`registry`]: [`VariantDefinition`] and [`VariantRegistry`], including
//!   [`VariantRegistry::load`] from a `serde_json::Value`.
//! - [`resolve`]: [`resolve`](resolve::resolve), default-mode selection and
//!   the `Packet` vectorization derivation.
//!
//! # Quick Start
//!
//! ```
//! use variantc_registry::prelude::*;
//!
//! let raw = serde_json::json!({
//!     "enabled": ["scalar_rgb", "packet_rgb"],
//!     "default": "scalar_rgb",
//!     "scalar_rgb": { "float": "float", "spectrum": "Color<Float, 3>" },
//!     "packet_rgb": { "float": "Packet<float>", "spectrum": "Color<Float, 3>" },
//! });
//!
//! let registry = VariantRegistry::load(&raw).unwrap();
//! let resolved = resolve(&registry).unwrap();
//!
//! assert_eq!(resolved.len(), 2);
//! assert_eq!(resolved.default_mode(), "scalar_rgb");
//! assert_eq!(resolved[1].spectrum, "Color<Packet<float>, 3>");
//! assert!(resolved[1].vectorized.is_some());
//! ```

#![deny(unsafe_code)]

pub mod registry;
pub mod resolve;
pub mod template;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while loading or resolving a variant configuration.
///
/// Every error is fatal to a generation run. Messages always contain the
/// offending field name or variant name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required field is absent from the configuration.
    #[error("missing required field '{field}'")]
    MissingField {
        field: String,
    },

    /// A field is present but holds a value of the wrong JSON type.
    #[error("field '{field}' has the wrong type (expected {expected})")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// A variant name is referenced that has no definition, or (in strict
    /// mode) a default that is not among the enabled variants.
    #[error("unknown variant \"{0}\" (no configuration with that name is defined or enabled)")]
    UnknownVariant(String),

    /// The enabled list is empty.
    #[error("there must be at least one enabled build configuration")]
    NoEnabledVariants,
}

impl ConfigError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::registry::{VariantDefinition, VariantRegistry};
    pub use crate::resolve::{
        resolve, resolve_with, ResolveOptions, ResolvedVariant, ResolvedVariants, VectorizedPair,
        VECTORIZATION_MARKER,
    };
    pub use crate::template::{ColorTemplate, PLACEHOLDER};
    pub use crate::ConfigError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
