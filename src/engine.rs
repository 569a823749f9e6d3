//! Placeholder expression engine.
//!
//! The rest of the crate only relies on the compile-once / render-many
//! contract of [`ExpressionEngine`]. [`HandlebarsEngine`] is the production
//! implementation: `{{name}}` placeholders, strict variable lookup, and no
//! HTML escaping since output goes into spreadsheet cells and file names.

use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::value::RowBindings;
use handlebars::Handlebars;

/// Compiles placeholder text into reusable renderers.
pub trait ExpressionEngine {
    /// Opaque handle to one compiled expression.
    type Renderer;

    /// Compile `source`. `location` names where the text came from (a cell
    /// address, "output filename") and is only used in error messages.
    fn compile(&mut self, location: &str, source: &str) -> TemplatinatorResult<Self::Renderer>;

    /// Evaluate a compiled expression against one row's bindings.
    fn render(&self, renderer: &Self::Renderer, bindings: &RowBindings) -> Result<String, String>;
}

/// Handlebars-backed engine. Each compiled expression is registered in the
/// underlying registry under a generated name; the renderer is that name.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
    compiled: usize,
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            registry,
            compiled: 0,
        }
    }

    /// Number of expressions compiled so far.
    pub fn compiled_count(&self) -> usize {
        self.compiled
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine for HandlebarsEngine {
    type Renderer = String;

    fn compile(&mut self, location: &str, source: &str) -> TemplatinatorResult<String> {
        let name = format!("expr_{}", self.compiled);
        self.registry
            .register_template_string(&name, source)
            .map_err(|e| TemplatinatorError::Compile {
                location: location.to_string(),
                message: e.to_string(),
            })?;
        self.compiled += 1;
        Ok(name)
    }

    fn render(&self, renderer: &String, bindings: &RowBindings) -> Result<String, String> {
        self.registry
            .render(renderer, bindings)
            .map_err(|e| e.to_string())
    }
}
