//! Variantc Emit -- Macro generation for resolved build variants.
//!
//! This crate turns a [`ResolvedVariants`](variantc_registry::resolve::ResolvedVariants)
//! sequence into the C++ configuration header that instantiates templates
//! once per enabled variant.
//!
//! # Modules
//!
//! - [`catalog`]: the fixed, ordered catalog of macro specs and the rule that
//!   builds each macro's lines.
//! - [`emitter`]: expands the catalog over the resolved variants. Pure.
//! - [`writer`]: assembles the header (continuation convention, include
//!   guard, `get_variant` lookup) and persists it atomically.
//!
//! # Example
//!
//! ```
//! use variantc_emit::prelude::*;
//! use variantc_registry::prelude::*;
//!
//! let raw = serde_json::json!({
//!     "enabled": ["a", "b"],
//!     "default": "a",
//!     "a": { "float": "F1", "spectrum": "Spec<Float>" },
//!     "b": { "float": "F2", "spectrum": "Spec<Float>" },
//! });
//! let resolved = resolve(&VariantRegistry::load(&raw).unwrap()).unwrap();
//!
//! let header = render(&resolved);
//! assert!(header.contains("#define MTS_DEFAULT_MODE \"a\""));
//! assert!(header.contains("return function<F2, Spec<F2>>(__VA_ARGS__);"));
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod emitter;
pub mod writer;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::catalog::{MacroShape, MacroSpec, CATALOG};
    pub use crate::emitter::{emit, emit_macro, EmittedMacro};
    pub use crate::writer::{
        digest, render, write_atomic, write_if_changed, WriteOutcome, LINE_WIDTH,
    };
}
