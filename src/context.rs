//! The collaborator bundle shared by one property tree

use std::fmt;
use std::sync::Arc;

use crate::config::Settings;
use crate::factory::NodeFactory;
use crate::logging::{Logger, NoticeCode, TracingLogger};
use crate::resolver::{NoopResolver, Resolver};
use crate::template::{HandlebarsEngine, TemplateEngine};
use crate::validation::{JsonSchemaValidator, Validator};

/// Logger, template engine, resolver, validator and render flags
///
/// One context is shared by every node of a tree. Trees handed out by the
/// [`Catalog`](crate::catalog::Catalog) each get their own fork.
#[derive(Clone)]
pub struct Context {
    logger: Arc<dyn Logger>,
    templates: Arc<dyn TemplateEngine>,
    resolver: Arc<dyn Resolver>,
    validator: Arc<dyn Validator>,
    developer_mode: bool,
    notify_validation: bool,
    template_extension: String,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// A context with default collaborators
    pub fn shared() -> Arc<Self> {
        Self::builder().build()
    }

    /// A factory building nodes bound to this context
    pub fn factory(self: &Arc<Self>) -> NodeFactory {
        NodeFactory::new(Arc::clone(self))
    }

    /// A new binding of the same collaborators, for an independent tree
    pub fn fork(&self) -> Arc<Self> {
        Arc::new(self.clone())
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn templates(&self) -> &dyn TemplateEngine {
        self.templates.as_ref()
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    pub fn developer_mode(&self) -> bool {
        self.developer_mode
    }

    pub fn notify_validation(&self) -> bool {
        self.notify_validation
    }

    pub fn template_extension(&self) -> &str {
        &self.template_extension
    }

    pub(crate) fn notice(&self, code: NoticeCode, message: &str) {
        self.logger.notice(code, message);
    }

    pub(crate) fn error(&self, code: NoticeCode, message: &str) {
        self.logger.error(code, message);
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("developer_mode", &self.developer_mode)
            .field("notify_validation", &self.notify_validation)
            .field("template_extension", &self.template_extension)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Context`]
pub struct ContextBuilder {
    logger: Arc<dyn Logger>,
    templates: Arc<dyn TemplateEngine>,
    resolver: Arc<dyn Resolver>,
    validator: Arc<dyn Validator>,
    developer_mode: bool,
    notify_validation: bool,
    template_extension: String,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            logger: Arc::new(TracingLogger),
            templates: Arc::new(HandlebarsEngine::new()),
            resolver: Arc::new(NoopResolver),
            validator: Arc::new(JsonSchemaValidator::default()),
            developer_mode: settings.render.developer_mode,
            notify_validation: settings.render.notify_validation,
            template_extension: settings.render.template_extension,
        }
    }
}

impl ContextBuilder {
    /// Start from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::default()
            .developer_mode(settings.render.developer_mode)
            .notify_validation(settings.render.notify_validation)
            .template_extension(settings.render.template_extension.clone())
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn templates(mut self, templates: Arc<dyn TemplateEngine>) -> Self {
        self.templates = templates;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn developer_mode(mut self, enabled: bool) -> Self {
        self.developer_mode = enabled;
        self
    }

    pub fn notify_validation(mut self, enabled: bool) -> Self {
        self.notify_validation = enabled;
        self
    }

    pub fn template_extension(mut self, extension: impl Into<String>) -> Self {
        self.template_extension = extension.into();
        self
    }

    pub fn build(self) -> Arc<Context> {
        Arc::new(Context {
            logger: self.logger,
            templates: self.templates,
            resolver: self.resolver,
            validator: self.validator,
            developer_mode: self.developer_mode,
            notify_validation: self.notify_validation,
            template_extension: self.template_extension,
        })
    }
}
