//! Template engine contract and its Handlebars implementation

use handlebars::Handlebars;
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{PatternError, Result};

/// Turns flattened component data into output text
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, variables: &Value) -> Result<String>;
}

/// Template engine backed by a Handlebars registry
///
/// Templates are addressed by the identifier they were registered under,
/// which for directory loads is the path relative to the directory
/// (`cta.hbs`, `layout/page.hbs`).
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        Self {
            registry: Handlebars::new(),
        }
    }

    /// Register a template from source text
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| PatternError::Template(format!("{}: {}", name, e)))
    }

    /// Register every file under `dir` whose extension is `extension`
    pub fn register_directory(&mut self, dir: &Path, extension: &str) -> Result<usize> {
        let mut count = 0;
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || path.extension().map(|e| e != extension).unwrap_or(true) {
                continue;
            }

            let relative = path
                .strip_prefix(dir)
                .map_err(|e| PatternError::Template(e.to_string()))?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let source = std::fs::read_to_string(path)?;
            self.register_template(&name, &source)?;
            count += 1;
        }

        tracing::debug!(count, dir = %dir.display(), "registered templates");
        Ok(count)
    }

    /// Load a directory into a new engine
    pub fn from_directory(dir: &Path, extension: &str) -> Result<Self> {
        let mut engine = Self::new();
        engine.register_directory(dir, extension)?;
        Ok(engine)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, template: &str, variables: &Value) -> Result<String> {
        self.registry
            .render(template, variables)
            .map_err(|e| PatternError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_registered_template() {
        let mut engine = HandlebarsEngine::new();
        engine.register_template("text.hbs", "<p class=\"pb-text\">{{value}}</p>").unwrap();

        let out = engine.render("text.hbs", &json!({"value": "<b>hi</b>"})).unwrap();
        assert_eq!(out, "<p class=\"pb-text\">&lt;b&gt;hi&lt;/b&gt;</p>");
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let engine = HandlebarsEngine::new();
        assert!(engine.render("missing.hbs", &json!({})).is_err());
    }

    #[test]
    fn test_register_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("cta.hbs"), "<a>{{text}}</a>").unwrap();
        std::fs::write(dir.path().join("nested/image.hbs"), "<img src=\"{{src}}\" />").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let engine = HandlebarsEngine::from_directory(dir.path(), "hbs").unwrap();
        assert!(engine.has_template("cta.hbs"));
        assert!(engine.has_template("nested/image.hbs"));
        assert!(!engine.has_template("notes.txt"));
    }
}
