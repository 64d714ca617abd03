//! # Generator Module
//!
//! Synthesizes Rust source for every user type in a [`Design`].
//!
//! ## Overview
//!
//! Each user type `Foo` becomes two structs and their methods:
//!
//! - **`FooPrivate`** - every field optional; the shape data is decoded into.
//!   It provides `validate()`, `finalize()` (fills in defaults) and
//!   `publicize()` (builds `Foo`)
//! - **`Foo`** - required and defaulted fields hold values directly. It
//!   provides `validate()`, and projected types also get one struct per view
//!   with `as_<view>_view()` and `project()`
//!
//! Declared transforms become free functions converting one public type
//! into another.
//!
//! ## Architecture
//!
//! ```text
//! Design → Synthesizers → Block IR → Block::render → askama module template
//! ```
//!
//! 1. **Synthesizers** ([`ValidationSynthesizer`], [`FinalizerSynthesizer`],
//!    [`PublicizerSynthesizer`], [`TypeTransformSynthesizer`],
//!    [`ProjectorSynthesizer`]) walk the attribute graph and emit [`Block`]s
//! 2. **Rendering** turns blocks into indented text
//! 3. **Templates** lay structs, impls and functions out into one module
//!
//! Named types are never expanded into their referrers: a field of type
//! `Bar` calls `Bar`'s own generated method. Recursion between types stays
//! recursion between generated functions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attrgen::config::GeneratorConfig;
//! use attrgen::design::load_design;
//! use attrgen::generator::generate;
//!
//! # fn main() -> anyhow::Result<()> {
//! let design = load_design("design.yaml".as_ref())?;
//! let module = generate(&design, &GeneratorConfig::default())?;
//! std::fs::write("types.rs", module.source)?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::design::{load_design, print_issues, Design, DesignError, Kind, UserType};

pub mod code;
pub mod finalizer;
mod literal;
pub mod naming;
pub mod projector;
pub mod publicizer;
mod reach;
pub mod templates;
pub mod transform;
pub mod types;
pub mod validation;

pub use code::{Block, Stmt, TempVars};
pub use finalizer::FinalizerSynthesizer;
pub use naming::{resolve, snake_case};
use naming::snake_words;
pub use projector::ProjectorSynthesizer;
pub use publicizer::PublicizerSynthesizer;
pub use templates::{render_module, ImplRender, MethodRender, ModuleTemplateData};
pub use transform::{TransformFunction, TransformHelper, TransformOutput, TypeTransformSynthesizer};
pub use types::{FieldDef, Representation, TypeDefinition};
pub use validation::ValidationSynthesizer;

/// Errors raised while synthesizing code.
///
/// Every variant is fatal to the call that raised it; no partial output is
/// produced.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("unknown type {0:?}")]
    UnknownType(String),
    #[error("type {type_name:?} has no view {view:?}")]
    UnknownView { type_name: String, view: String },
    #[error("type {0:?} is not an object")]
    NotAnObject(String),
    #[error("invalid metadata transform key: missing value on attribute {field} of {context}")]
    MissingTransformKey { field: String, context: String },
    #[error("{source_path} is {source_kind} but {target_path} is {target_kind}")]
    Incompatible {
        source_path: String,
        source_kind: Kind,
        target_path: String,
        target_kind: Kind,
    },
    #[error("default value at {0} does not match its type")]
    InvalidDefault(String),
    #[error("inline object needs an owner path to name its struct")]
    MissingOwner,
    #[error("invalid design: {0} issue(s)")]
    InvalidDesign(usize),
    #[error("failed to render module: {0}")]
    Render(#[from] askama::Error),
}

impl From<DesignError> for SynthError {
    fn from(err: DesignError) -> Self {
        match err {
            DesignError::UnknownType(name) => SynthError::UnknownType(name),
            DesignError::NotAnObject(name) => SynthError::NotAnObject(name),
            DesignError::Invalid(issues) => SynthError::InvalidDesign(issues.len()),
        }
    }
}

/// Shared, read-only inputs of every synthesizer.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub design: &'a Design,
    pub config: &'a GeneratorConfig,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(design: &'a Design, config: &'a GeneratorConfig) -> Self {
        Context { design, config }
    }
}

/// A rendered module and what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    pub source: String,
    pub type_count: usize,
    pub transform_count: usize,
}

const METHOD_DEPTH: usize = 2;
const FUNCTION_DEPTH: usize = 1;

/// Render `block` as a function body, followed by an optional tail
/// expression.
fn body(block: &Block, tail: Option<&str>, depth: usize) -> String {
    let mut out = block.render(depth);
    if let Some(tail) = tail {
        out.push_str(&"    ".repeat(depth));
        out.push_str(tail);
        out.push('\n');
    }
    out
}

fn validate_method(ctx: Context<'_>, user_type: &UserType, rep: Representation) -> Result<MethodRender, SynthError> {
    let rt = &ctx.config.runtime_path;
    let checks = ValidationSynthesizer::new(ctx, rep).synthesize(
        &user_type.attribute,
        "self",
        &user_type.name,
        0,
    )?;
    let text = if checks.is_empty() {
        body(&Block::new(), Some("Ok(())"), METHOD_DEPTH)
    } else {
        let mut block = Block::new();
        block.let_mut(validation::ERRORS_VAR, format!("{rt}::ValidationErrors::new()"));
        block.extend(checks);
        body(&block, Some(&format!("{}.into_result()", validation::ERRORS_VAR)), METHOD_DEPTH)
    };
    Ok(MethodRender {
        doc: vec!["Checks every validation rule, reporting all violations.".to_string()],
        signature: format!("pub fn validate(&self) -> Result<(), {rt}::ValidationErrors>"),
        body: text,
    })
}

fn private_impl(ctx: Context<'_>, user_type: &UserType) -> Result<ImplRender, SynthError> {
    let public = ctx.struct_name(&user_type.name, Representation::Public);
    let finalize = FinalizerSynthesizer::new(ctx)
        .with_owner(&user_type.name)
        .synthesize(&user_type.attribute, "self", 0)?;
    let publicize = PublicizerSynthesizer::new(ctx)
        .with_owner(&user_type.name)
        .synthesize_type(user_type)?;
    Ok(ImplRender {
        type_name: ctx.struct_name(&user_type.name, Representation::Private),
        methods: vec![
            validate_method(ctx, user_type, Representation::Private)?,
            MethodRender {
                doc: vec!["Sets unset fields that declare a default.".to_string()],
                signature: "pub fn finalize(&mut self)".to_string(),
                body: body(&finalize, None, METHOD_DEPTH),
            },
            MethodRender {
                doc: vec![format!("Converts into [`{public}`]; call after `validate` and `finalize`.")],
                signature: format!("pub fn publicize(&self) -> {public}"),
                body: body(&publicize, Some("target"), METHOD_DEPTH),
            },
        ],
    })
}

fn public_impl(ctx: Context<'_>, user_type: &UserType) -> Result<ImplRender, SynthError> {
    let mut methods = vec![validate_method(ctx, user_type, Representation::Public)?];
    let projector = ProjectorSynthesizer::new(ctx);
    for view in &user_type.views {
        let block = projector.synthesize_method(user_type, &view.name)?;
        methods.push(MethodRender {
            doc: vec![format!("Projects onto the `{}` view.", view.name)],
            signature: format!(
                "pub fn as_{}_view(&self) -> {}",
                snake_words(&view.name),
                ctx.view_struct_name(&user_type.name, &view.name)
            ),
            body: body(&block, Some("target"), METHOD_DEPTH),
        });
    }
    if let Some(view) = user_type.default_view() {
        methods.push(MethodRender {
            doc: vec!["Projects onto the default view.".to_string()],
            signature: format!(
                "pub fn project(&self) -> {}",
                ctx.view_struct_name(&user_type.name, &view.name)
            ),
            body: body(
                &Block::new(),
                Some(&format!("self.as_{}_view()", snake_words(&view.name))),
                METHOD_DEPTH,
            ),
        });
    }
    Ok(ImplRender {
        type_name: ctx.struct_name(&user_type.name, Representation::Public),
        methods,
    })
}

/// Synthesize the module for every type and transform in `design`.
///
/// The design is assumed to have passed [`Design::validate`]; references it
/// failed to resolve surface here as [`SynthError`]s.
///
/// # Errors
///
/// Returns the first synthesis error met, or a template rendering error.
pub fn generate(design: &Design, config: &GeneratorConfig) -> Result<GeneratedModule, SynthError> {
    let ctx = Context::new(design, config);
    let mut structs = Vec::new();
    let mut impls = Vec::new();
    let mut type_count = 0;

    for user_type in design.types() {
        debug!(type_name = %user_type.name, views = user_type.views.len(), "synthesizing type");
        structs.extend(ctx.definitions(user_type, Representation::Private)?);
        structs.extend(ctx.definitions(user_type, Representation::Public)?);
        structs.extend(ctx.view_definitions(user_type)?);
        impls.push(private_impl(ctx, user_type)?);
        impls.push(public_impl(ctx, user_type)?);
        type_count += 1;
    }

    let synthesizer = TypeTransformSynthesizer::new(ctx);
    let declared = design
        .transforms()
        .iter()
        .map(|decl| synthesizer.synthesize_function(decl))
        .collect::<Result<Vec<_>, _>>()?;
    let mut emitted: BTreeSet<String> = declared.iter().map(|f| f.name.clone()).collect();
    let mut functions = Vec::new();
    let mut helpers = Vec::new();
    for function in &declared {
        debug!(function = %function.name, helpers = function.helpers.len(), "synthesized transform");
        functions.push(MethodRender {
            doc: vec![format!(
                "Converts [`{}`] into [`{}`].",
                function.source_type, function.target_type
            )],
            signature: format!(
                "pub fn {}(source: &{}) -> {}",
                function.name, function.source_type, function.target_type
            ),
            body: body(&function.body, Some("target"), FUNCTION_DEPTH),
        });
        for helper in &function.helpers {
            if emitted.insert(helper.name.clone()) {
                helpers.push(MethodRender {
                    doc: Vec::new(),
                    signature: format!(
                        "fn {}(source: &{}) -> {}",
                        helper.name, helper.source_type, helper.target_type
                    ),
                    body: body(&helper.body, Some("target"), FUNCTION_DEPTH),
                });
            }
        }
    }
    functions.extend(helpers);

    let data = ModuleTemplateData {
        header_lines: config.header.iter().cloned().collect(),
        derive_serde: config.derive_serde,
        structs,
        impls,
        functions,
    };
    let source = render_module(&data)?;
    info!(
        types = type_count,
        transforms = declared.len(),
        bytes = source.len(),
        "generated module"
    );
    Ok(GeneratedModule {
        source,
        type_count,
        transform_count: declared.len(),
    })
}

/// Load the design at `design_path`, check it, generate the module and write
/// it to `output` when given.
///
/// Nothing is written unless generation succeeds.
///
/// # Errors
///
/// Returns an error if the design cannot be loaded, has error-level issues,
/// fails to synthesize, or the output cannot be written.
pub fn write_module(
    design_path: &Path,
    output: Option<&Path>,
    config: &GeneratorConfig,
) -> anyhow::Result<GeneratedModule> {
    let design = load_design(design_path)?;
    match design.validate() {
        Ok(warnings) => print_issues(&warnings),
        Err(DesignError::Invalid(issues)) => {
            print_issues(&issues);
            let errors = issues.iter().filter(|i| i.is_error()).count();
            anyhow::bail!("design {} has {errors} error(s)", design_path.display());
        }
        Err(err) => return Err(err.into()),
    }

    let module = generate(&design, config)
        .with_context(|| format!("Failed to generate code for {}", design_path.display()))?;

    if let Some(output) = output {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(output, &module.source)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(path = %output.display(), bytes = module.source.len(), "wrote module");
    }
    Ok(module)
}
