//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use pattern_schemas::{
    Catalog, Context, HandlebarsEngine, MemoryLogger, PatternError, Resolver, Result, SchemaNode,
};
use serde_json::Value;

/// Every fixture schema, by short name
pub const FIXTURES: &[(&str, &str)] = &[
    ("text", include_str!("../fixtures/text.json")),
    ("default_property", include_str!("../fixtures/default_property.json")),
    ("object", include_str!("../fixtures/object.json")),
    ("composite", include_str!("../fixtures/composite.json")),
    ("cta", include_str!("../fixtures/cta.json")),
    ("image", include_str!("../fixtures/image.json")),
    ("test_render", include_str!("../fixtures/test_render.json")),
];

pub fn templates_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates")
}

/// Expands `$ref` entries naming a fixture file (`cta.json`)
pub struct MapResolver {
    schemas: HashMap<String, Value>,
}

impl MapResolver {
    pub fn fixtures() -> Self {
        let schemas = FIXTURES
            .iter()
            .map(|(name, text)| {
                let value: Value = serde_json::from_str(text).unwrap();
                (format!("{}.json", name), value)
            })
            .collect();
        Self { schemas }
    }

    fn expand(&self, value: &mut Value) -> Result<()> {
        if let Some(reference) = value.get("$ref").and_then(Value::as_str) {
            let target = self.schemas.get(reference).ok_or_else(|| PatternError::Resolve {
                reference: reference.to_string(),
                reason: "no such fixture".to_string(),
            })?;
            *value = target.clone();
        }

        match value {
            Value::Object(map) => {
                for child in map.values_mut() {
                    self.expand(child)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.expand(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, schema: &mut SchemaNode, _base_path: Option<&str>) -> Result<()> {
        self.expand(schema.as_value_mut())
    }
}

/// A context with a memory logger, the fixture resolver and fixture templates
pub fn context(developer_mode: bool) -> (Arc<Context>, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let engine = HandlebarsEngine::from_directory(&templates_path(), "hbs").unwrap();
    let context = Context::builder()
        .logger(logger.clone())
        .resolver(Arc::new(MapResolver::fixtures()))
        .templates(Arc::new(engine))
        .developer_mode(developer_mode)
        .build();
    (context, logger)
}

/// A catalog holding every fixture schema
pub fn catalog(context: Arc<Context>) -> Catalog {
    let mut catalog = Catalog::new(context);
    for (name, text) in FIXTURES {
        let path = format!("tests/fixtures/{}.json", name);
        catalog.register_str(*name, text, Some(path.as_str())).unwrap();
    }
    catalog
}
