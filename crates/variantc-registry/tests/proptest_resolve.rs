//! Property tests for variant resolution.
//!
//! These tests use `proptest` to generate random registries and enabled
//! lists and verify that resolution preserves order and multiplicity,
//! substitutes templates textually, and derives vectorized pairs exactly for
//! packet tags.

use proptest::prelude::*;
use variantc_registry::prelude::*;

const POOL: [&str; 5] = ["scalar_mono", "scalar_rgb", "packet_rgb", "llvm_spectral", "cuda_rgb"];

fn tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("float".to_owned()),
        Just("double".to_owned()),
        "[A-Z][a-z0-9]{0,6}",
        "[a-z0-9]{1,4}".prop_map(|s| format!("Packet{s}")),
    ]
}

fn template_strategy() -> impl Strategy<Value = String> {
    // Up to three placeholders interleaved with placeholder-free text.
    prop::collection::vec("[a-z<>, 0-9]{0,5}", 1..5).prop_map(|parts| parts.join(PLACEHOLDER))
}

fn registry_from(tags: &[(String, String)], enabled: &[usize]) -> VariantRegistry {
    let definitions = POOL
        .iter()
        .zip(tags)
        .map(|(name, (tag, template))| {
            ((*name).to_owned(), VariantDefinition::new(tag.clone(), template.as_str()))
        });
    VariantRegistry::new(definitions, enabled.iter().map(|&i| POOL[i]), None)
}

proptest! {
    #[test]
    fn resolution_preserves_order_and_multiplicity(
        tags in prop::collection::vec((tag_strategy(), template_strategy()), POOL.len()),
        enabled in prop::collection::vec(0..POOL.len(), 1..12),
    ) {
        let registry = registry_from(&tags, &enabled);
        let resolved = resolve(&registry).unwrap();

        prop_assert_eq!(resolved.len(), enabled.len());
        for (variant, &index) in resolved.iter().zip(&enabled) {
            prop_assert_eq!(variant.name.as_str(), POOL[index]);
        }
        prop_assert_eq!(resolved.default_mode(), POOL[enabled[0]]);
    }

    #[test]
    fn spectrum_is_template_with_every_placeholder_replaced(
        tag in tag_strategy(),
        parts in prop::collection::vec("[a-z<>, 0-9]{0,5}", 1..5),
    ) {
        let template = parts.join(PLACEHOLDER);
        let registry = VariantRegistry::new(
            [("v".to_owned(), VariantDefinition::new(tag.clone(), template.as_str()))],
            ["v"],
            None,
        );
        let resolved = resolve(&registry).unwrap();

        prop_assert_eq!(&resolved[0].spectrum, &parts.join(&tag));
        prop_assert_eq!(ColorTemplate::new(template).placeholder_count(), parts.len() - 1);
    }

    #[test]
    fn vectorization_iff_marker_prefix(tag in tag_strategy(), template in template_strategy()) {
        let registry = VariantRegistry::new(
            [("v".to_owned(), VariantDefinition::new(tag.clone(), template.as_str()))],
            ["v"],
            Some("v".to_owned()),
        );
        let resolved = resolve(&registry).unwrap();
        let variant = &resolved[0];

        prop_assert_eq!(variant.is_vectorized(), tag.starts_with(VECTORIZATION_MARKER));
        match &variant.vectorized {
            Some(pair) => {
                let wrapped = format!("DynamicArray<{tag}>");
                prop_assert_eq!(&pair.float, &wrapped);
                prop_assert_eq!(&pair.spectrum, &ColorTemplate::new(template).substitute(&wrapped));
            }
            None => {
                prop_assert_eq!(variant.binding_pair(), variant.plain_pair());
            }
        }
    }

    #[test]
    fn unknown_names_are_reported_verbatim(name in "[a-z_]{1,12}") {
        prop_assume!(!POOL.contains(&name.as_str()));
        let registry = VariantRegistry::new(
            [("scalar_rgb".to_owned(), VariantDefinition::new("float", "Color<Float, 3>"))],
            ["scalar_rgb".to_owned(), name.clone()],
            None,
        );
        prop_assert_eq!(resolve(&registry).unwrap_err(), ConfigError::UnknownVariant(name));
    }
}
