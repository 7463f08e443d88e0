//! Resolution of a [`VariantRegistry`] into emitter-ready variants.
//!
//! [`resolve`] walks the enabled list in order, looks up each definition,
//! substitutes its color template with the numeric tag and, for packet
//! (vectorized) tags, derives the secondary [`VectorizedPair`] used by the
//! python-binding macros. The result is a [`ResolvedVariants`]: a non-empty,
//! ordered sequence plus the chosen default mode.
//!
//! # Ordering
//!
//! The resolved order is exactly the enabled order. Nothing is sorted or
//! deduplicated; a name enabled twice resolves twice and is logged with
//! `tracing::warn!`.
//!
//! # Default mode
//!
//! A configured default is used verbatim. An absent default falls back to the
//! first resolved variant. A default that names no enabled variant is
//! accepted and warned about, unless [`ResolveOptions::strict_default`] is
//! set, in which case it fails with [`ConfigError::UnknownVariant`].

use std::collections::HashSet;
use std::ops::Deref;

use serde::Serialize;
use tracing::{debug, warn};

use crate::registry::VariantRegistry;
use crate::ConfigError;

/// Numeric tags starting with this prefix are packed/vectorized types.
pub const VECTORIZATION_MARKER: &str = "Packet";

// ---------------------------------------------------------------------------
// ResolveOptions
// ---------------------------------------------------------------------------

/// Knobs for [`resolve_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Reject a default that is not among the enabled variants.
    pub strict_default: bool,
}

// ---------------------------------------------------------------------------
// ResolvedVariant
// ---------------------------------------------------------------------------

/// The dynamic-array pair derived for packet variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorizedPair {
    /// `DynamicArray<tag>`.
    pub float: String,
    /// The color template substituted with [`float`](Self::float).
    pub spectrum: String,
}

/// A variant after substitution, ready for macro emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariant {
    /// The variant name, as enabled.
    pub name: String,
    /// The numeric-representation tag.
    pub float: String,
    /// The color type with every placeholder replaced by [`float`](Self::float).
    pub spectrum: String,
    /// Present only when [`float`](Self::float) starts with
    /// [`VECTORIZATION_MARKER`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vectorized: Option<VectorizedPair>,
}

impl ResolvedVariant {
    /// The plain `(float, spectrum)` pair.
    pub fn plain_pair(&self) -> (&str, &str) {
        (&self.float, &self.spectrum)
    }

    /// The pair python bindings expose: the vectorized pair for packet
    /// variants, the plain pair otherwise.
    pub fn binding_pair(&self) -> (&str, &str) {
        match &self.vectorized {
            Some(pair) => (&pair.float, &pair.spectrum),
            None => self.plain_pair(),
        }
    }

    /// Returns `true` for packet variants.
    pub fn is_vectorized(&self) -> bool {
        self.vectorized.is_some()
    }
}

// ---------------------------------------------------------------------------
// ResolvedVariants
// ---------------------------------------------------------------------------

/// The non-empty, ordered output of resolution.
///
/// Only [`resolve`] and [`resolve_with`] construct this type, so holding one
/// proves at least one variant is enabled. It dereferences to a slice of
/// [`ResolvedVariant`] in enabled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariants {
    variants: Vec<ResolvedVariant>,
    default_mode: String,
}

impl ResolvedVariants {
    /// The default mode name to emit.
    pub fn default_mode(&self) -> &str {
        &self.default_mode
    }

    /// The resolved variants in enabled order.
    pub fn as_slice(&self) -> &[ResolvedVariant] {
        &self.variants
    }

    /// The first enabled variant. Always present.
    pub fn first(&self) -> &ResolvedVariant {
        &self.variants[0]
    }
}

impl Deref for ResolvedVariants {
    type Target = [ResolvedVariant];

    fn deref(&self) -> &Self::Target {
        &self.variants
    }
}

impl<'a> IntoIterator for &'a ResolvedVariants {
    type Item = &'a ResolvedVariant;
    type IntoIter = std::slice::Iter<'a, ResolvedVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

/// Resolve with permissive default handling.
///
/// Equivalent to `resolve_with(registry, ResolveOptions::default())`.
pub fn resolve(registry: &VariantRegistry) -> Result<ResolvedVariants, ConfigError> {
    resolve_with(registry, ResolveOptions::default())
}

/// Resolve the enabled variants of `registry`.
///
/// # Errors
///
/// - [`ConfigError::UnknownVariant`] for the first enabled name with no
///   definition, or (strict mode) for a default outside the enabled set.
/// - [`ConfigError::NoEnabledVariants`] if the enabled list is empty.
pub fn resolve_with(
    registry: &VariantRegistry,
    options: ResolveOptions,
) -> Result<ResolvedVariants, ConfigError> {
    let mut variants = Vec::with_capacity(registry.enabled().len());
    let mut seen = HashSet::new();

    for name in registry.enabled() {
        let definition = registry
            .definition(name)
            .ok_or_else(|| ConfigError::UnknownVariant(name.clone()))?;

        if !seen.insert(name.as_str()) {
            warn!(variant = %name, "variant enabled more than once; it will be emitted twice");
        }

        let float = definition.float.clone();
        let spectrum = definition.spectrum.substitute(&float);
        let vectorized = float.starts_with(VECTORIZATION_MARKER).then(|| {
            let wrapped = format!("DynamicArray<{float}>");
            VectorizedPair {
                spectrum: definition.spectrum.substitute(&wrapped),
                float: wrapped,
            }
        });

        debug!(
            variant = %name,
            float = %float,
            spectrum = %spectrum,
            vectorized = vectorized.is_some(),
            "resolved variant"
        );

        variants.push(ResolvedVariant {
            name: name.clone(),
            float,
            spectrum,
            vectorized,
        });
    }

    if variants.is_empty() {
        return Err(ConfigError::NoEnabledVariants);
    }

    let default_mode = match registry.default_variant() {
        Some(default) => {
            if !seen.contains(default) {
                if options.strict_default {
                    return Err(ConfigError::UnknownVariant(default.to_owned()));
                }
                warn!(default = %default, "default mode is not among the enabled variants");
            }
            default.to_owned()
        }
        None => variants[0].name.clone(),
    };

    Ok(ResolvedVariants {
        variants,
        default_mode,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
