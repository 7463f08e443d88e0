//! Macro emission: turns [`ResolvedVariants`] into macro bodies.
//!
//! [`emit`] walks the [`CATALOG`] in order and expands each
//! [`MacroSpec`] through [`emit_macro`], the single routine that knows how to
//! iterate variants for every [`MacroShape`]. Emission is pure: no I/O, no
//! errors. The input is non-empty by construction, so every per-variant macro
//! receives at least one line per variant.

use tracing::debug;
use variantc_registry::resolve::ResolvedVariants;

use crate::catalog::{MacroShape, MacroSpec, CATALOG};

// ---------------------------------------------------------------------------
// EmittedMacro
// ---------------------------------------------------------------------------

/// A fully expanded macro definition.
///
/// `lines[0]` is the `#define` line; the remaining lines form the body. No
/// line carries a trailing continuation; see
/// [`writer::format_macro`](crate::writer::format_macro).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedMacro {
    /// Bare macro name, e.g. `MTS_ROUTE_MODE`.
    pub name: &'static str,
    /// The `#define` line followed by the body lines.
    pub lines: Vec<String>,
}

impl EmittedMacro {
    /// The body lines, without the `#define` line.
    pub fn body(&self) -> &[String] {
        &self.lines[1..]
    }
}

/// The keyword opening the `index`-th branch of a conditional chain.
pub fn branch_keyword(index: usize) -> &'static str {
    if index == 0 {
        "if"
    } else {
        "else if"
    }
}

// ---------------------------------------------------------------------------
// emit
// ---------------------------------------------------------------------------

/// Expand every catalog macro, in catalog order.
pub fn emit(variants: &ResolvedVariants) -> Vec<EmittedMacro> {
    CATALOG.iter().map(|spec| emit_macro(spec, variants)).collect()
}

/// Expand a single macro.
pub fn emit_macro(spec: &MacroSpec, variants: &ResolvedVariants) -> EmittedMacro {
    debug_assert!(!variants.is_empty(), "ResolvedVariants is never empty");

    let define = format!("#define {}", spec.signature);
    let mut lines = Vec::new();

    match spec.shape {
        MacroShape::DefaultMode => {
            lines.push(format!("{define} \"{}\"", variants.default_mode()));
        }
        MacroShape::PerVariant(rule) => {
            lines.push(define);
            lines.extend(variants.iter().flat_map(rule));
        }
        MacroShape::Composite { lines: fixed, nested } => {
            lines.push(define);
            lines.extend(fixed.iter().map(|line| (*line).to_owned()));
            lines.push(format!("    {nested}"));
        }
        MacroShape::Scaffold {
            prologue,
            block,
            epilogue,
        } => {
            lines.push(define);
            lines.extend(prologue.iter().map(|line| (*line).to_owned()));
            lines.extend(variants.iter().flat_map(block));
            lines.extend(epilogue.iter().map(|line| (*line).to_owned()));
        }
        MacroShape::Dispatch {
            prologue,
            branch,
            fallback,
            epilogue,
        } => {
            lines.push(define);
            lines.extend(prologue.iter().map(|line| (*line).to_owned()));
            for (index, variant) in variants.iter().enumerate() {
                lines.extend(branch(variant, branch_keyword(index)));
            }
            lines.extend(fallback.iter().map(|line| (*line).to_owned()));
            lines.extend(epilogue.iter().map(|line| (*line).to_owned()));
        }
    }

    debug!(
        name = spec.name(),
        shape = spec.shape.kind(),
        lines = lines.len(),
        "emitted macro"
    );

    EmittedMacro {
        name: spec.name(),
        lines,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
