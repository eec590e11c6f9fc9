//! Tera-based rendering of template paths and file contents.
//!
//! Every template sees the same context built from [`Values`] and the same
//! custom filters. Undefined variables are errors, so an unresolved placeholder
//! surfaces as a [`TemplateError`] instead of an empty string.

mod filters;

use tera::{Context, Tera};

use crate::error::TemplateError;
use crate::values::Values;

/// Renders path and content templates against one set of values.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
    context: Context,
}

impl Renderer {
    pub fn new(values: &Values) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        filters::register(&mut tera);

        Self {
            tera,
            context: values.template_context(),
        }
    }

    /// Render a `/`-separated relative path template.
    ///
    /// Each component is rendered on its own, so a placeholder value may not
    /// introduce a separator. The result must stay a plain relative path: no
    /// empty, `.` or `..` components and no leading separator.
    pub fn render_path(&mut self, template_path: &str) -> Result<String, TemplateError> {
        let mut components = Vec::new();
        for segment in template_path.split('/') {
            let component = self
                .tera
                .render_str(segment, &self.context)
                .map_err(|e| TemplateError::render(template_path, e))?;
            components.push(component);
        }

        let usable = components.iter().all(|component| {
            !component.is_empty()
                && component != "."
                && component != ".."
                && !component.contains(['/', '\\', '\0'])
        });

        let rendered = components.join("/");
        if !usable {
            return Err(TemplateError::InvalidPath {
                template: template_path.to_string(),
                rendered,
            });
        }
        Ok(rendered)
    }

    /// Render a content template. `name` is only used for error reporting.
    pub fn render_content(&mut self, name: &str, source: &[u8]) -> Result<String, TemplateError> {
        let source = std::str::from_utf8(source).map_err(|_| TemplateError::NotUtf8 {
            template: name.to_string(),
        })?;
        self.tera
            .render_str(source, &self.context)
            .map_err(|e| TemplateError::render(name, e))
    }
}
