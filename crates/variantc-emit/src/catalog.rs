//! The fixed catalog of generated macros.
//!
//! Each [`MacroSpec`] pairs a macro signature with a [`MacroShape`] that
//! describes how its body is built from the resolved variants. The catalog
//! order, the signatures and the text of every rule are a compatibility
//! surface for the C++ code that expands these macros: changing any of them
//! is a breaking change.
//!
//! Rules return lines *without* the trailing line continuation; the writer
//! applies that convention when the header is assembled.

use std::fmt;

use variantc_registry::resolve::ResolvedVariant;

/// Builds the lines contributed by one variant.
pub type VariantRule = fn(&ResolvedVariant) -> Vec<String>;

/// Builds one conditional branch; the second argument is the branch keyword
/// (`if` for the first variant, `else if` afterwards).
pub type BranchRule = fn(&ResolvedVariant, &str) -> Vec<String>;

// ---------------------------------------------------------------------------
// MacroShape
// ---------------------------------------------------------------------------

/// How a macro body is generated.
#[derive(Clone, Copy)]
pub enum MacroShape {
    /// Lines produced by `rule` for each variant, in order.
    PerVariant(VariantRule),
    /// A one-line macro whose value is the default mode string literal.
    DefaultMode,
    /// Fixed lines followed by an invocation of another catalog macro.
    Composite {
        lines: &'static [&'static str],
        nested: &'static str,
    },
    /// Fixed prologue, one block per variant, fixed epilogue.
    Scaffold {
        prologue: &'static [&'static str],
        block: VariantRule,
        epilogue: &'static [&'static str],
    },
    /// An `if` / `else if` chain over the variants closed by an unconditional
    /// `else` fallback.
    Dispatch {
        prologue: &'static [&'static str],
        branch: BranchRule,
        fallback: &'static [&'static str],
        epilogue: &'static [&'static str],
    },
}

impl MacroShape {
    /// Short label for the shape, used in logs and `Debug` output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PerVariant(_) => "per-variant",
            Self::DefaultMode => "default-mode",
            Self::Composite { .. } => "composite",
            Self::Scaffold { .. } => "scaffold",
            Self::Dispatch { .. } => "dispatch",
        }
    }
}

impl fmt::Debug for MacroShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite { lines, nested } => f
                .debug_struct("Composite")
                .field("lines", lines)
                .field("nested", nested)
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

// ---------------------------------------------------------------------------
// MacroSpec
// ---------------------------------------------------------------------------

/// One entry of the macro catalog.
#[derive(Clone, Copy)]
pub struct MacroSpec {
    /// The macro name with its parameter list, e.g. `MTS_INSTANTIATE_OBJECT(Name)`.
    pub signature: &'static str,
    pub shape: MacroShape,
}

impl MacroSpec {
    /// The bare macro name, without the parameter list.
    pub fn name(&self) -> &'static str {
        match self.signature.find('(') {
            Some(paren) => &self.signature[..paren],
            None => self.signature,
        }
    }
}

impl fmt::Debug for MacroSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroSpec")
            .field("signature", &self.signature)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Look up a catalog entry by bare macro name.
pub fn find(name: &str) -> Option<&'static MacroSpec> {
    CATALOG.iter().find(|spec| spec.name() == name)
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn configuration_name(v: &ResolvedVariant) -> Vec<String> {
    vec![format!("    \"{}\\n\"", v.name)]
}

fn configuration_name_indented(v: &ResolvedVariant) -> Vec<String> {
    vec![format!("    \"            {}\\n\"", v.name)]
}

fn instantiate_class(v: &ResolvedVariant) -> Vec<String> {
    vec![format!("    template class MTS_EXPORT Name<{}, {}>;", v.float, v.spectrum)]
}

fn instantiate_struct(v: &ResolvedVariant) -> Vec<String> {
    vec![format!("    template struct MTS_EXPORT Name<{}, {}>;", v.float, v.spectrum)]
}

fn py_declare(v: &ResolvedVariant) -> Vec<String> {
    vec![format!(
        "    extern void python_export_variants_{}_##name(py::module &);",
        v.name
    )]
}

fn py_def_submodule(v: &ResolvedVariant) -> Vec<String> {
    vec![format!(
        "    auto __submodule__{0} =  m.def_submodule(\"{0}\").def_submodule(#lib);",
        v.name
    )]
}

fn py_import(v: &ResolvedVariant) -> Vec<String> {
    vec![format!(
        "    python_export_variants_{0}_##name(__submodule__{0});",
        v.name
    )]
}

fn py_export_block(v: &ResolvedVariant) -> Vec<String> {
    let (float_x, spectrum_x) = v.binding_pair();
    vec![
        format!("    void python_export_variants_{}_##name(py::module &m) {{", v.name),
        format!(
            "        instantiate_##name<{}, {}, {}, {}>(m);",
            float_x, spectrum_x, v.float, v.spectrum
        ),
        "    }".to_owned(),
    ]
}

fn route_branch(v: &ResolvedVariant, keyword: &str) -> Vec<String> {
    vec![
        format!("        {} (mode == \"{}\")", keyword, v.name),
        format!("            return function<{}, {}>(__VA_ARGS__);", v.float, v.spectrum),
    ]
}

fn py_cast(v: &ResolvedVariant) -> Vec<String> {
    // `spectrum` is already the single-pass substitution. Substituting it
    // again would rewrite a tag that contains `Float`: `Spec<Float>` with
    // `Float32` must stay `Spec<Float32>`, not become `Spec<Float3232>`.
    let (float, spectrum) = v.plain_pair();
    vec![
        format!("    if (auto tmp = dynamic_cast<Name<{float}, {spectrum}> *>(o); tmp)"),
        "        return py::cast(tmp);".to_owned(),
    ]
}

const PY_TEMPLATE_HEAD: [&str; 2] = [
    "    template <typename Float, typename Spectrum,",
    "              typename FloatP, typename SpectrumP>",
];

// ---------------------------------------------------------------------------
// CATALOG
// ---------------------------------------------------------------------------

/// Every generated macro, in emission order.
pub static CATALOG: &[MacroSpec] = &[
    MacroSpec {
        signature: "MTS_CONFIGURATIONS",
        shape: MacroShape::PerVariant(configuration_name),
    },
    MacroSpec {
        signature: "MTS_CONFIGURATIONS_INDENTED",
        shape: MacroShape::PerVariant(configuration_name_indented),
    },
    MacroSpec {
        signature: "MTS_DEFAULT_MODE",
        shape: MacroShape::DefaultMode,
    },
    MacroSpec {
        signature: "MTS_INSTANTIATE_OBJECT(Name)",
        shape: MacroShape::PerVariant(instantiate_class),
    },
    MacroSpec {
        signature: "MTS_INSTANTIATE_STRUCT(Name)",
        shape: MacroShape::PerVariant(instantiate_struct),
    },
    MacroSpec {
        signature: "MTS_IMPLEMENT_PLUGIN(Name, Parent, Descr)",
        shape: MacroShape::Composite {
            lines: &[
                "    extern \"C\" {",
                "        MTS_EXPORT const char *plugin_name() { return #Name; }",
                "        MTS_EXPORT const char *plugin_descr() { return Descr; }",
                "    }",
            ],
            nested: "MTS_INSTANTIATE_OBJECT(Name)",
        },
    },
    MacroSpec {
        signature: "MTS_PY_DECLARE_VARIANTS(name)",
        shape: MacroShape::PerVariant(py_declare),
    },
    MacroSpec {
        signature: "MTS_PY_DEF_SUBMODULE_VARIANTS(lib)",
        shape: MacroShape::PerVariant(py_def_submodule),
    },
    MacroSpec {
        signature: "MTS_PY_IMPORT_VARIANTS(name)",
        shape: MacroShape::PerVariant(py_import),
    },
    MacroSpec {
        signature: "MTS_PY_EXPORT_VARIANTS(name)",
        shape: MacroShape::Scaffold {
            prologue: &[
                PY_TEMPLATE_HEAD[0],
                PY_TEMPLATE_HEAD[1],
                "    void instantiate_##name(py::module m);",
                "",
            ],
            block: py_export_block,
            epilogue: &[
                "",
                PY_TEMPLATE_HEAD[0],
                PY_TEMPLATE_HEAD[1],
                "    void instantiate_##name(py::module m)",
            ],
        },
    },
    MacroSpec {
        signature: "MTS_ROUTE_MODE(mode, function, ...)",
        shape: MacroShape::Dispatch {
            prologue: &["    [&]() {"],
            branch: route_branch,
            fallback: &["        else", "            Throw(\"Unsupported mode: %s\", mode);"],
            epilogue: &["    }()"],
        },
    },
    MacroSpec {
        signature: "PY_CAST_VARIANTS(Name)",
        shape: MacroShape::PerVariant(py_cast),
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
