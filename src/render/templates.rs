// Template engine for HTML output

use crate::error::Result;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Template engine wrapping Tera with embedded templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html.tera")),
            ("index.html", include_str!("../../templates/index.html.tera")),
            (
                "entity.html",
                include_str!("../../templates/entity.html.tera"),
            ),
        ])?;

        // Contexts are built in Rust and values (hrefs, slugified ids) are
        // inserted verbatim; Tera's default HTML autoescape mangles path
        // separators ("/" -> "&#x2F;"), so keep the templates literal.
        tera.autoescape_on(vec![]);

        tera.register_filter("slugify", slugify_filter);

        Ok(Self { tera })
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Convert text to URL-friendly slug
fn slugify_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    Ok(Value::String(crate::render::slugify(s)))
}
