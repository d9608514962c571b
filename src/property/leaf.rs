use serde_json::Value;
use std::sync::Arc;

use super::{PropertyNode, PropertyValue, PropertyView};
use crate::context::Context;
use crate::logging::NoticeCode;
use crate::schema::SchemaNode;

/// A property holding a single value
#[derive(Debug, Clone)]
pub struct LeafProperty {
    schema: Arc<SchemaNode>,
    context: Arc<Context>,
    schema_path: Option<String>,
    value: Option<Value>,
}

impl LeafProperty {
    /// Create a leaf, starting from the schema default or its only enum member
    pub fn new(schema: impl Into<Arc<SchemaNode>>, context: Arc<Context>, schema_path: Option<&str>) -> Self {
        let schema = schema.into();
        let value = schema.initial_value().cloned();
        Self {
            schema,
            context,
            schema_path: schema_path.map(str::to_string),
            value,
        }
    }

    pub fn is_readonly(&self) -> bool {
        self.schema.is_readonly()
    }

    pub(crate) fn rebind(&mut self, context: &Arc<Context>) {
        self.context = Arc::clone(context);
    }
}

impl PropertyNode for LeafProperty {
    fn get(&self, _name: Option<&str>) -> Option<PropertyView<'_>> {
        self.value.as_ref().map(PropertyView::Value)
    }

    /// Replace the value unless the schema marks it readonly. No coercion
    /// and no validation happen here.
    fn set<V: Into<PropertyValue>>(&mut self, name: &str, value: V) -> &mut Self {
        if self.is_readonly() {
            self.context.notice(
                NoticeCode::ReadonlyProperty,
                &format!("Cannot change the value of the readonly property: {}.", name),
            );
        } else {
            self.value = Some(value.into().into_data());
        }
        self
    }

    fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    fn context(&self) -> &Arc<Context> {
        &self.context
    }

    fn schema_path(&self) -> Option<&str> {
        self.schema_path.as_deref()
    }

    fn values(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }

    fn prepare_render(&self) -> Value {
        self.values()
    }

    fn render(&self) -> Value {
        self.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use serde_json::json;

    fn leaf(schema: Value) -> (LeafProperty, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        let context = Context::builder().logger(logger.clone()).build();
        (LeafProperty::new(SchemaNode::new(schema), context, None), logger)
    }

    #[test]
    fn test_round_trip() {
        let (mut node, _) = leaf(json!({"type": "string"}));
        assert!(node.get(None).is_none());

        node.set("value", "http://example.com");
        assert_eq!(node.get(None).and_then(|v| v.as_str()), Some("http://example.com"));

        node.set("value", 42i64);
        assert_eq!(node.get(None).and_then(|v| v.as_value()), Some(&json!(42)));
    }

    #[test]
    fn test_readonly_keeps_default() {
        let (mut node, logger) = leaf(json!({"default": "default_value", "readonly": true}));
        assert_eq!(node.get(None).and_then(|v| v.as_str()), Some("default_value"));

        node.set("name", "x");
        assert_eq!(node.get(None).and_then(|v| v.as_str()), Some("default_value"));

        let notices = logger.with_code(NoticeCode::ReadonlyProperty);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("name"));
    }

    #[test]
    fn test_single_enum_member_is_initial_value() {
        let (node, _) = leaf(json!({"enum": ["primary"]}));
        assert_eq!(node.values(), json!("primary"));
    }

    #[test]
    fn test_emptiness_follows_value() {
        let (mut node, _) = leaf(json!({"type": "string"}));
        assert!(node.is_empty(None));

        node.set("value", "x");
        assert!(!node.is_empty(None));

        node.set("value", Value::Null);
        assert!(node.is_empty(None));

        node.set("value", false);
        assert!(!node.is_empty(None));
    }

    #[test]
    fn test_render_is_value() {
        let (mut node, _) = leaf(json!({"type": "number"}));
        node.set("value", 100.99);
        assert_eq!(node.prepare_render(), json!(100.99));
        assert_eq!(node.render(), json!(100.99));
    }

    #[test]
    fn test_validate_leaf() {
        let (mut node, _) = leaf(json!({"type": "string"}));
        assert!(node.validate(false).is_ok());

        node.set("value", "pass");
        assert!(node.validate(false).is_ok());

        node.set("value", json!({"v": "text"}));
        let errors = node.validate(false).unwrap_err();
        assert!(!errors.is_empty());
        assert!(!errors[0].message.is_empty());
    }
}
