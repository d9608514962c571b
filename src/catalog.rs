//! Schema catalog
//!
//! Holds named schemas and a cache of prototype components built from
//! them. A cached prototype is never handed out: every load returns an
//! independent copy bound to a freshly forked context, while the schema
//! data itself stays shared.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::context::Context;
use crate::error::{PatternError, Result};
use crate::logging::NoticeCode;
use crate::property::Component;
use crate::schema::SchemaNode;

/// A registered schema and where it came from
#[derive(Debug, Clone)]
struct SchemaSource {
    schema: Arc<SchemaNode>,
    path: Option<String>,
}

/// Named schemas plus a prototype cache
#[derive(Debug)]
pub struct Catalog {
    context: Arc<Context>,
    sources: HashMap<String, SchemaSource>,
    cache: HashMap<String, Component>,
    use_cache: bool,
}

impl Catalog {
    pub fn new(context: Arc<Context>) -> Self {
        Self {
            context,
            sources: HashMap::new(),
            cache: HashMap::new(),
            use_cache: true,
        }
    }

    /// A catalog honouring the `[cache]` settings
    pub fn from_settings(context: Arc<Context>, settings: &Settings) -> Self {
        Self::new(context).with_cache(settings.cache.enabled)
    }

    /// Turn the prototype cache on or off
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Cache identifier for a schema name
    pub fn cache_id(name: &str) -> String {
        let hash = Sha256::digest(name.as_bytes());
        format!("pattern:{:x}", hash)
    }

    /// Register a parsed schema under a short name
    ///
    /// Re-registering a name drops its cached prototype.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaNode, path: Option<&str>) {
        let name = name.into();
        self.cache.remove(&Self::cache_id(&name));
        self.sources.insert(
            name,
            SchemaSource {
                schema: Arc::new(schema),
                path: path.map(str::to_string),
            },
        );
    }

    /// Decode and register schema text
    pub fn register_str(&mut self, name: impl Into<String>, text: &str, path: Option<&str>) -> Result<()> {
        let name = name.into();
        match SchemaNode::from_json_str(text) {
            Ok(schema) => {
                self.register(name, schema, path);
                Ok(())
            }
            Err(err) => {
                self.context.error(
                    NoticeCode::DecodeFailed,
                    &format!("Error decoding {}: {}", path.unwrap_or(name.as_str()), err),
                );
                Err(PatternError::Json(err))
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of cached prototypes
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// A new component for the named schema
    ///
    /// Unknown names are logged and yield `None`.
    pub fn load(&mut self, name: &str) -> Option<Component> {
        let cid = Self::cache_id(name);
        if self.use_cache {
            if let Some(prototype) = self.cache.get(&cid) {
                return Some(self.detach(prototype));
            }
        }

        let Some(prototype) = self.build(name) else {
            self.context.error(
                NoticeCode::UnknownSchema,
                &format!("JSON shortname of {} was not found.", name),
            );
            return None;
        };

        let component = self.detach(&prototype);
        if self.use_cache {
            self.cache.insert(cid, prototype);
        }
        Some(component)
    }

    /// Like [`load`](Self::load), but an unknown name is an error
    pub fn try_load(&mut self, name: &str) -> Result<Component> {
        self.load(name)
            .ok_or_else(|| PatternError::UnknownSchema(name.to_string()))
    }

    /// Build a prototype for every registered schema
    pub fn warm_cache(&mut self) {
        let names: Vec<String> = self.sources.keys().cloned().collect();
        for name in names {
            if let Some(prototype) = self.build(&name) {
                self.cache.insert(Self::cache_id(&name), prototype);
            }
        }
        tracing::debug!(cached = self.cache.len(), "warmed prototype cache");
    }

    /// Drop the prototype stored under `cid`
    pub fn clear_cache(&mut self, cid: &str) {
        self.cache.remove(cid);
    }

    /// Drop the prototype for a schema name
    pub fn clear_cache_by_name(&mut self, name: &str) {
        self.clear_cache(&Self::cache_id(name));
    }

    /// Drop every prototype
    pub fn clear_all_cache(&mut self) {
        self.cache.clear();
    }

    fn build(&self, name: &str) -> Option<Component> {
        let source = self.sources.get(name)?;
        Some(Component::new(
            Arc::clone(&source.schema),
            self.context.fork(),
            Some(name),
            source.path.as_deref(),
        ))
    }

    fn detach(&self, prototype: &Component) -> Component {
        let mut component = prototype.clone();
        component.rebind(&self.context.fork());
        component
    }
}
