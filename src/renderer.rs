//! Template rendering for yuca.
//! Output files are rendered in place with MiniJinja, using `{=` and `=}` as
//! comment delimiters so `{#` stays free for the output syntax.
use crate::error::YucaResult;
use log::debug;
use minijinja::{syntax::SyntaxConfig, Environment};
use std::fs;
use std::path::Path;

/// Comment delimiters used by every rendered file.
pub const COMMENT_DELIMITERS: (&str, &str) = ("{=", "=}");

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `YucaResult<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> YucaResult<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the yuca comment delimiters.
    pub fn new() -> YucaResult<Self> {
        let (comment_start, comment_end) = COMMENT_DELIMITERS;
        let syntax = SyntaxConfig::builder()
            .comment_delimiters(comment_start, comment_end)
            .build()?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> YucaResult<String> {
        Ok(self.env.render_str(template, context)?)
    }
}

/// Renders the file at `path` against `context` and overwrites it.
///
/// # Errors
/// * `YucaError::IoError` if the file cannot be read or written
/// * `YucaError::MinijinjaError` if the content is not a valid template
pub fn fill_template_file<P: AsRef<Path>>(
    path: P,
    context: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> YucaResult<()> {
    let path = path.as_ref();
    debug!("Rendering file: {}", path.display());
    let content = fs::read_to_string(path)?;
    let rendered = renderer.render(&content, context)?;
    fs::write(path, rendered)?;
    Ok(())
}
