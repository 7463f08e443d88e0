//! Color-representation type templates.
//!
//! A variant's color type is written in terms of the placeholder token
//! [`PLACEHOLDER`] (`Float`), e.g. `Color<Float, 3>`. [`ColorTemplate`] wraps
//! the raw template text and exposes a single substitution operation so the
//! replacement rule lives in one place.

use std::fmt;

use serde::Serialize;

/// The token in a color template that stands for the numeric tag.
pub const PLACEHOLDER: &str = "Float";

/// A color-representation type expression containing zero or more
/// [`PLACEHOLDER`] tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorTemplate(String);

impl ColorTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw, unsubstituted template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of placeholder occurrences in the template.
    pub fn placeholder_count(&self) -> usize {
        self.0.matches(PLACEHOLDER).count()
    }

    /// Replace every placeholder occurrence with `numeric_tag`.
    ///
    /// This is one left-to-right textual pass over the template: text that
    /// comes from `numeric_tag` is never rescanned, so a tag such as
    /// `Float32` is inserted verbatim.
    pub fn substitute(&self, numeric_tag: &str) -> String {
        self.0.replace(PLACEHOLDER, numeric_tag)
    }
}

impl fmt::Display for ColorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for ColorTemplate {
    fn from(template: String) -> Self {
        Self(template)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
