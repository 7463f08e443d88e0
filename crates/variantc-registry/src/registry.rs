//! Variant definitions and the registry that holds them.
//!
//! The [`VariantRegistry`] is the validated-by-shape form of the variant
//! configuration: every named [`VariantDefinition`], the ordered list of
//! enabled names, and the designated default. Shape validation (required
//! fields, JSON types) happens in [`VariantRegistry::load`]; referential
//! validation (do enabled names exist?) is deferred to
//! [`resolve`](crate::resolve::resolve).
//!
//! # Configuration layout
//!
//! ```json
//! {
//!     "enabled": ["scalar_rgb", "packet_rgb"],
//!     "default": "scalar_rgb",
//!     "scalar_rgb": { "float": "float",    "spectrum": "Color<Float, 3>" },
//!     "packet_rgb": { "float": "Packet8f", "spectrum": "Color<Float, 3>" }
//! }
//! ```
//!
//! Only the entries named in `enabled` are read as variant definitions.
//! Anything else at the top level (disabled or half-written variants,
//! comments) is left alone.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::template::ColorTemplate;
use crate::ConfigError;

/// Key holding the ordered list of enabled variant names.
pub const ENABLED_KEY: &str = "enabled";
/// Key holding the default variant name.
pub const DEFAULT_KEY: &str = "default";
/// Per-variant key holding the numeric-representation tag.
pub const FLOAT_KEY: &str = "float";
/// Per-variant key holding the color-representation template.
pub const SPECTRUM_KEY: &str = "spectrum";

// ---------------------------------------------------------------------------
// VariantDefinition
// ---------------------------------------------------------------------------

/// One named build configuration as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDefinition {
    /// The numeric-representation tag (e.g. `float`, `double`, `Packet8f`).
    pub float: String,
    /// The color-representation template, written in terms of `Float`.
    pub spectrum: ColorTemplate,
}

impl VariantDefinition {
    pub fn new(float: impl Into<String>, spectrum: impl Into<ColorTemplate>) -> Self {
        Self {
            float: float.into(),
            spectrum: spectrum.into(),
        }
    }

    fn from_json(name: &str, object: &Map<String, Value>) -> Result<Self, ConfigError> {
        let float = required_str(object, FLOAT_KEY, || format!("{name}.{FLOAT_KEY}"))?;
        let spectrum = required_str(object, SPECTRUM_KEY, || format!("{name}.{SPECTRUM_KEY}"))?;
        Ok(Self::new(float, spectrum))
    }
}

// ---------------------------------------------------------------------------
// VariantRegistry
// ---------------------------------------------------------------------------

/// All known variant definitions plus the enabled selection.
///
/// Definitions are keyed by name in a `BTreeMap` so that iteration is
/// deterministic. The *enabled* list keeps the
/// exact order and multiplicity it was given in; it is never sorted or
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantRegistry {
    definitions: BTreeMap<String, VariantDefinition>,
    enabled: Vec<String>,
    default: Option<String>,
}

impl VariantRegistry {
    /// Build a registry programmatically.
    ///
    /// Unlike [`load`](Self::load), the default may be left unspecified; the
    /// resolver then falls back to the first enabled variant.
    pub fn new(
        definitions: impl IntoIterator<Item = (String, VariantDefinition)>,
        enabled: impl IntoIterator<Item = impl Into<String>>,
        default: Option<String>,
    ) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
            enabled: enabled.into_iter().map(Into::into).collect(),
            default,
        }
    }

    /// Add or replace a definition, builder style.
    pub fn with_definition(mut self, name: impl Into<String>, definition: VariantDefinition) -> Self {
        self.definitions.insert(name.into(), definition);
        self
    }

    /// Parse a registry from an already-decoded JSON configuration.
    ///
    /// Definitions are read for enabled names only. An enabled name with no
    /// top-level entry is kept in the enabled list and reported by
    /// [`resolve`](crate::resolve::resolve) as an unknown variant.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingField`] if `enabled` or `default` is absent, or
    ///   an enabled definition lacks `float` / `spectrum` (reported as
    ///   `name.float`).
    /// - [`ConfigError::TypeMismatch`] if the root is not an object, `enabled`
    ///   is not a list of strings, `default` is not a string, an enabled entry
    ///   is not an object (reported as `name`), or one of its fields is not a
    ///   string.
    pub fn load(raw: &Value) -> Result<Self, ConfigError> {
        let root = raw
            .as_object()
            .ok_or_else(|| ConfigError::mismatch("<root>", "an object"))?;

        let enabled = root
            .get(ENABLED_KEY)
            .ok_or_else(|| ConfigError::missing(ENABLED_KEY))?
            .as_array()
            .ok_or_else(|| ConfigError::mismatch(ENABLED_KEY, "a list of strings"))?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| ConfigError::mismatch(format!("{ENABLED_KEY}[{i}]"), "a string"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let default = root
            .get(DEFAULT_KEY)
            .ok_or_else(|| ConfigError::missing(DEFAULT_KEY))?
            .as_str()
            .ok_or_else(|| ConfigError::mismatch(DEFAULT_KEY, "a string"))?
            .to_owned();

        let mut definitions = BTreeMap::new();
        for name in &enabled {
            if definitions.contains_key(name) || name == ENABLED_KEY || name == DEFAULT_KEY {
                continue;
            }
            let Some(value) = root.get(name) else {
                continue;
            };
            let object = value
                .as_object()
                .ok_or_else(|| ConfigError::mismatch(name.clone(), "an object"))?;
            definitions.insert(name.clone(), VariantDefinition::from_json(name, object)?);
        }

        debug!(
            definitions = definitions.len(),
            enabled = enabled.len(),
            default = %default,
            "loaded variant registry"
        );

        Ok(Self {
            definitions,
            enabled,
            default: Some(default),
        })
    }

    /// Look up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&VariantDefinition> {
        self.definitions.get(name)
    }

    /// All definitions, ordered by name.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &VariantDefinition)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Enabled variant names in configuration order, duplicates included.
    pub fn enabled(&self) -> &[String] {
        &self.enabled
    }

    /// The designated default variant, if one was given.
    pub fn default_variant(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

// -- helpers ----------------------------------------------------------------

fn required_str(
    object: &Map<String, Value>,
    key: &str,
    path: impl Fn() -> String,
) -> Result<String, ConfigError> {
    object
        .get(key)
        .ok_or_else(|| ConfigError::missing(path()))?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ConfigError::mismatch(path(), "a string"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- helpers ------------------------------------------------------------

    fn base_config() -> Value {
        json!({
            "enabled": ["scalar_mono", "scalar_rgb"],
            "default": "scalar_rgb",
            "scalar_mono": { "float": "float", "spectrum": "Color<Float, 1>" },
            "scalar_rgb": { "float": "float", "spectrum": "Color<Float, 3>" },
            "packet_rgb": { "float": "Packet8f", "spectrum": "Color<Float, 3>" },
        })
    }

    fn without(mut config: Value, key: &str) -> Value {
        config.as_object_mut().unwrap().remove(key);
        config
    }

    fn with(mut config: Value, key: &str, value: Value) -> Value {
        config.as_object_mut().unwrap().insert(key.to_owned(), value);
        config
    }

    // -- load ---------------------------------------------------------------

    #[test]
    fn load_reads_enabled_definitions_and_keeps_enabled_order() {
        let registry = VariantRegistry::load(&base_config()).unwrap();

        assert_eq!(registry.enabled(), ["scalar_mono", "scalar_rgb"]);
        assert_eq!(registry.default_variant(), Some("scalar_rgb"));
        assert_eq!(registry.definitions().count(), 2);

        let mono = registry.definition("scalar_mono").unwrap();
        assert_eq!(mono.float, "float");
        assert_eq!(mono.spectrum.as_str(), "Color<Float, 1>");

        // Disabled entries are not read.
        assert!(registry.definition("packet_rgb").is_none());
    }

    #[test]
    fn duplicate_enabled_names_share_one_definition() {
        let config = with(base_config(), "enabled", json!(["scalar_rgb", "scalar_rgb"]));
        let registry = VariantRegistry::load(&config).unwrap();
        assert_eq!(registry.enabled(), ["scalar_rgb", "scalar_rgb"]);
        assert_eq!(registry.definitions().count(), 1);
    }

    #[test]
    fn missing_enabled_is_reported() {
        let err = VariantRegistry::load(&without(base_config(), "enabled")).unwrap_err();
        assert_eq!(err, ConfigError::missing("enabled"));
    }

    #[test]
    fn missing_default_is_reported() {
        let err = VariantRegistry::load(&without(base_config(), "default")).unwrap_err();
        assert_eq!(err, ConfigError::missing("default"));
    }

    #[test]
    fn non_string_default_is_a_type_mismatch() {
        let err = VariantRegistry::load(&with(base_config(), "default", json!(3))).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "default"));
    }

    #[test]
    fn enabled_must_be_a_list() {
        let err =
            VariantRegistry::load(&with(base_config(), "enabled", json!("scalar_rgb"))).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "enabled"));
    }

    #[test]
    fn enabled_must_contain_only_strings() {
        let err = VariantRegistry::load(&with(base_config(), "enabled", json!(["scalar_rgb", 7])))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "enabled[1]"));
    }

    #[test]
    fn root_must_be_an_object() {
        let err = VariantRegistry::load(&json!(["scalar_rgb"])).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn disabled_malformed_entry_loads() {
        let config = json!({
            "enabled": ["a"],
            "default": "a",
            "a": { "float": "F1", "spectrum": "Spec<Float>" },
            "wip": { "float": "Packet16f" },
        });
        let registry = VariantRegistry::load(&config).unwrap();
        assert!(registry.definition("wip").is_none());

        let resolved = crate::resolve::resolve(&registry).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].spectrum, "Spec<F1>");
    }

    #[test]
    fn enabled_non_object_entry_is_a_type_mismatch() {
        let config = with(base_config(), "scalar_mono", json!("float"));
        let err = VariantRegistry::load(&config).unwrap_err();
        assert_eq!(err, ConfigError::mismatch("scalar_mono", "an object"));
    }

    #[test]
    fn enabled_definition_fields_are_required() {
        let config = with(base_config(), "scalar_mono", json!({ "float": "double" }));
        let err = VariantRegistry::load(&config).unwrap_err();
        assert_eq!(err, ConfigError::missing("scalar_mono.spectrum"));
    }

    #[test]
    fn enabled_definition_fields_must_be_strings() {
        let config = with(base_config(), "scalar_rgb", json!({ "float": 64, "spectrum": "Float" }));
        let err = VariantRegistry::load(&config).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "scalar_rgb.float"));
    }

    #[test]
    fn enabled_name_without_entry_is_left_for_resolve() {
        let config = with(base_config(), "enabled", json!(["scalar_rgb", "llvm_rgb"]));
        let registry = VariantRegistry::load(&config).unwrap();
        assert_eq!(registry.enabled(), ["scalar_rgb", "llvm_rgb"]);
        assert!(registry.definition("llvm_rgb").is_none());
    }

    #[test]
    fn non_object_entries_are_ignored() {
        let config = with(base_config(), "comment", json!("build matrix for CI"));
        let registry = VariantRegistry::load(&config).unwrap();
        assert!(registry.definition("comment").is_none());
        assert_eq!(registry.definitions().count(), 2);
    }

    #[test]
    fn empty_enabled_list_loads() {
        // Emptiness is a resolve-time error, not a load-time one.
        let registry = VariantRegistry::load(&with(base_config(), "enabled", json!([]))).unwrap();
        assert!(registry.enabled().is_empty());
    }

    // -- programmatic construction ---------------------------------------------

    #[test]
    fn new_allows_unspecified_default() {
        let registry = VariantRegistry::new(
            [("a".to_owned(), VariantDefinition::new("F1", "Spec<Float>"))],
            ["a"],
            None,
        );
        assert_eq!(registry.default_variant(), None);
        assert_eq!(registry.enabled(), ["a"]);
    }

    #[test]
    fn with_definition_replaces_existing_entry() {
        let registry = VariantRegistry::new(
            [("a".to_owned(), VariantDefinition::new("F1", "Spec<Float>"))],
            ["a"],
            None,
        )
        .with_definition("a", VariantDefinition::new("F9", "Spec<Float>"));
        assert_eq!(registry.definition("a").unwrap().float, "F9");
    }
}
