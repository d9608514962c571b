use serde_json::Value;
use std::sync::Arc;

use super::{Property, PropertyNode, PropertyValue, PropertyView};
use crate::context::Context;
use crate::schema::SchemaNode;

/// An append-only list of items, built from an array schema
///
/// `set` behaves like [`push`](Self::push): the name argument is ignored
/// and there is no positional replace.
#[derive(Debug, Clone)]
pub struct CompositeComponent {
    schema: Arc<SchemaNode>,
    context: Arc<Context>,
    schema_path: Option<String>,
    items: Vec<PropertyValue>,
}

impl CompositeComponent {
    pub fn new(schema: impl Into<Arc<SchemaNode>>, context: Arc<Context>, schema_path: Option<&str>) -> Self {
        Self {
            schema: schema.into(),
            context,
            schema_path: schema_path.map(str::to_string),
            items: Vec::new(),
        }
    }

    /// Append an item
    pub fn push<V: Into<PropertyValue>>(&mut self, value: V) -> &mut Self {
        self.items.push(value.into());
        self
    }

    pub fn items(&self) -> &[PropertyValue] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PropertyValue> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The schema every item is expected to conform to
    pub fn item_schema(&self) -> Option<SchemaNode> {
        self.schema.items()
    }

    /// A fresh node built from the item schema, ready to fill and push
    pub fn new_item(&self) -> Option<Property> {
        let schema = self.item_schema()?;
        Some(self.context.factory().create(schema, self.schema_path.as_deref()))
    }

    pub(crate) fn rebind(&mut self, context: &Arc<Context>) {
        self.context = Arc::clone(context);
        for item in &mut self.items {
            item.rebind(context);
        }
    }
}

/// Text of a scalar render result; structured results are dropped
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl PropertyNode for CompositeComponent {
    fn get(&self, _name: Option<&str>) -> Option<PropertyView<'_>> {
        Some(PropertyView::Items(&self.items))
    }

    /// Append `value`; `name` is ignored
    fn set<V: Into<PropertyValue>>(&mut self, _name: &str, value: V) -> &mut Self {
        self.push(value)
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
        Value::Array(self.items.iter().map(PropertyValue::values).collect())
    }

    fn prepare_render(&self) -> Value {
        Value::Array(self.items.iter().map(PropertyValue::prepare_render).collect())
    }

    /// Render every live item and join the results in order
    fn render(&self) -> Value {
        let output: String = self
            .items
            .iter()
            .filter_map(PropertyValue::as_node)
            .filter_map(|node| scalar_text(node.render()))
            .collect();
        Value::String(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::HandlebarsEngine;
    use serde_json::json;

    fn text_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "template": { "type": "string", "default": "text.hbs" },
                "value": { "type": "string" }
            }
        })
    }

    fn list_schema() -> SchemaNode {
        SchemaNode::new(json!({ "type": "array", "items": text_schema() }))
    }

    #[test]
    fn test_append_only() {
        let mut list = CompositeComponent::new(list_schema(), Context::shared(), None);
        list.set("content", "a").set("content", "b").set("other", "c");

        assert_eq!(list.len(), 3);
        assert_eq!(list.values(), json!(["a", "b", "c"]));
    }

    #[test]
    fn test_new_item_uses_item_schema() {
        let list = CompositeComponent::new(list_schema(), Context::shared(), None);
        let item = list.new_item().unwrap();
        assert!(matches!(item, Property::Component(_)));
        assert!(item.schema().has_property("value"));
    }

    #[test]
    fn test_render_concatenates_items() {
        let mut engine = HandlebarsEngine::new();
        engine.register_template("text.hbs", "<p>{{value}}</p>").unwrap();
        let context = Context::builder().templates(Arc::new(engine)).build();

        let mut list = CompositeComponent::new(list_schema(), context, None);
        assert_eq!(list.render(), json!(""));

        for text in ["one", "two"] {
            let mut item = list.new_item().unwrap();
            item.set("value", text);
            list.push(item);
        }
        list.push("plain data is not rendered");

        assert_eq!(list.render(), json!("<p>one</p><p>two</p>"));
    }

    #[test]
    fn test_empty_until_an_item_has_content() {
        let mut list = CompositeComponent::new(list_schema(), Context::shared(), None);
        assert!(list.is_empty(None));

        let item = list.new_item().unwrap();
        list.push(item.clone());
        // the item only carries its default template
        assert!(!list.is_empty(None));

        let mut blank = CompositeComponent::new(list_schema(), Context::shared(), None);
        blank.push(Value::Null).push("");
        assert!(blank.is_empty(None));
    }
}
