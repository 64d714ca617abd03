use askama::Template;

use super::types::TypeDefinition;

/// A method or free function, with its body already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRender {
    /// Doc comment lines
    pub doc: Vec<String>,
    /// Everything before the opening brace (e.g., `pub fn finalize(&mut self)`)
    pub signature: String,
    /// Indented body lines, each ending in a newline
    pub body: String,
}

/// An inherent `impl` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplRender {
    /// The type the block belongs to
    pub type_name: String,
    /// Methods in emission order
    pub methods: Vec<MethodRender>,
}

/// Template data for a generated module
///
/// Structs come first, then their `impl` blocks, then transform functions.
#[derive(Template)]
#[template(path = "module.rs.txt", escape = "none")]
pub struct ModuleTemplateData {
    /// Extra comment lines below the generated-code marker
    pub header_lines: Vec<String>,
    /// Whether structs derive `Serialize`/`Deserialize`
    pub derive_serde: bool,
    /// Struct declarations
    pub structs: Vec<TypeDefinition>,
    /// Inherent impls
    pub impls: Vec<ImplRender>,
    /// Transform functions and their helpers
    pub functions: Vec<MethodRender>,
}

/// Render a complete module.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_module(data: &ModuleTemplateData) -> Result<String, askama::Error> {
    data.render()
}
