//! Header assembly and persistence.
//!
//! [`render`] produces the complete configuration header:
//!
//! 1. `#pragma once` and the forward-declaration include;
//! 2. every emitted macro in catalog order, each followed by a blank line;
//! 3. the `get_variant<Float, Spectrum>()` lookup, which maps a type pair
//!    back to its variant name (the reverse of `MTS_ROUTE_MODE`).
//!
//! Macro lines are padded to [`LINE_WIDTH`] columns and terminated with a
//! ` \` continuation, except the last line of each macro.
//!
//! [`write_atomic`] and [`write_if_changed`] persist the text through a
//! temporary file renamed over the destination, so readers never observe a
//! partially written header.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use variantc_registry::resolve::ResolvedVariants;

use crate::emitter::{branch_keyword, emit, EmittedMacro};

/// Column at which the line continuation is placed.
pub const LINE_WIDTH: usize = 75;

/// The single external include of the generated header.
pub const FORWARD_INCLUDE: &str = "<mitsuba/core/fwd.h>";

/// Outer namespace of the lookup function.
pub const NAMESPACE: &str = "mitsuba";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the full header for `variants`.
pub fn render(variants: &ResolvedVariants) -> String {
    let mut out = String::new();
    out.push_str("#pragma once\n\n");
    out.push_str(&format!("#include {FORWARD_INCLUDE}\n\n"));

    for emitted in emit(variants) {
        out.push_str(&format_macro(&emitted));
        out.push('\n');
    }

    out.push_str(&render_lookup(variants));
    out
}

/// Apply the continuation convention to one macro.
///
/// Every line but the last is left-justified to [`LINE_WIDTH`] columns and
/// followed by ` \`. Lines wider than that are kept whole.
pub fn format_macro(emitted: &EmittedMacro) -> String {
    let mut out = String::new();
    let last = emitted.lines.len().saturating_sub(1);
    for (index, line) in emitted.lines.iter().enumerate() {
        if index == last {
            out.push_str(line);
            out.push('\n');
        } else {
            out.push_str(&format!("{line:<LINE_WIDTH$} \\\n"));
        }
    }
    out
}

fn render_lookup(variants: &ResolvedVariants) -> String {
    let mut out = String::new();
    out.push_str(&format!("NAMESPACE_BEGIN({NAMESPACE})\n"));
    out.push_str("NAMESPACE_BEGIN(detail)\n");
    out.push_str(
        "template <typename Float, typename Spectrum_> constexpr const char *get_variant() {\n",
    );
    for (index, variant) in variants.iter().enumerate() {
        let (float, spectrum) = variant.plain_pair();
        out.push_str(&format!(
            "    {} constexpr (std::is_same_v<Float, {float}> && std::is_same_v<Spectrum_, {spectrum}>)\n",
            branch_keyword(index)
        ));
        out.push_str(&format!("        return \"{}\";\n", variant.name));
    }
    out.push_str("    else\n");
    out.push_str("        return \"\";\n");
    out.push_str("}\n");
    out.push_str("NAMESPACE_END(detail)\n");
    out.push_str(&format!("NAMESPACE_END({NAMESPACE})\n"));
    out
}

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// BLAKE3 hex digest of a rendered header.
pub fn digest(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}

/// Digest of the file at `path`, or `None` if it does not exist.
pub fn existing_digest(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(blake3::hash(&bytes).to_hex().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Result of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The header was (re)written.
    Written,
    /// The existing header already had identical contents.
    Unchanged,
}

/// Write `contents` to `path` atomically, creating parent directories.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over `path`. On failure the destination is left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .context("failed to write temporary header")?;
    tmp.as_file()
        .sync_all()
        .context("failed to flush temporary header")?;
    tmp.persist(path)
        .with_context(|| format!("failed to move header into place at {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote header");
    Ok(())
}

/// Write `contents` unless `path` already holds identical bytes.
///
/// Skipping identical output keeps the file's modification time stable, so
/// build systems do not recompile everything that includes the header.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome> {
    let wanted = digest(contents);
    if existing_digest(path)?.as_deref() == Some(wanted.as_str()) {
        info!(path = %path.display(), digest = %wanted, "header is up to date");
        return Ok(WriteOutcome::Unchanged);
    }
    write_atomic(path, contents)?;
    info!(path = %path.display(), digest = %wanted, "header written");
    Ok(WriteOutcome::Written)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
