use serde_json::{Map, Value};
use std::sync::Arc;

use super::{Properties, Property, PropertyNode, PropertyValue, PropertyView};
use crate::context::Context;
use crate::logging::NoticeCode;
use crate::schema::SchemaNode;

/// A property with named children, built from an object schema
///
/// Children exist only for properties the schema declares. Those with a
/// default (or a single enum member) are created up front in declaration
/// order; the rest appear on first write.
#[derive(Debug, Clone)]
pub struct Component {
    schema: Arc<SchemaNode>,
    context: Arc<Context>,
    schema_name: Option<String>,
    schema_path: Option<String>,
    properties: Properties,
}

impl Component {
    /// Create a component
    ///
    /// `schema_name` is the short name the schema is known by; it supplies
    /// the `name` and `template` render variables when the values lack them.
    /// `schema_path` is where the schema was loaded from and anchors
    /// relative references.
    pub fn new(
        schema: impl Into<Arc<SchemaNode>>,
        context: Arc<Context>,
        schema_name: Option<&str>,
        schema_path: Option<&str>,
    ) -> Self {
        let mut component = Self {
            schema: schema.into(),
            context,
            schema_name: schema_name.map(str::to_string),
            schema_path: schema_path.map(str::to_string),
            properties: Properties::default(),
        };
        component.init_default_properties();
        component
    }

    fn init_default_properties(&mut self) {
        let factory = self.context.factory();
        let defaults: Vec<(String, SchemaNode)> = self
            .schema
            .property_names()
            .filter_map(|name| self.schema.property(name).map(|fragment| (name.to_string(), fragment)))
            .filter(|(_, fragment)| fragment.initial_value().is_some())
            .collect();

        for (name, fragment) in defaults {
            let node = factory.create(fragment, self.schema_path.as_deref());
            self.properties.insert(&name, node);
        }
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    pub fn set_schema_path(&mut self, schema_path: impl Into<String>) {
        self.schema_path = Some(schema_path.into());
    }

    pub fn schema_property_exists(&self, name: &str) -> bool {
        self.schema.has_property(name)
    }

    /// The schema declared for a property, if any
    pub fn schema_property(&self, name: &str) -> Option<SchemaNode> {
        self.schema.property(name)
    }

    /// The children currently present
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Mutable access to one child
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.get_mut(name)
    }

    /// Template identifier derived from the schema name
    pub fn theme(&self) -> Option<String> {
        self.schema_name
            .as_ref()
            .map(|name| format!("{}.{}", name, self.context.template_extension()))
    }

    pub(crate) fn rebind(&mut self, context: &Arc<Context>) {
        self.context = Arc::clone(context);
        for child in self.properties.iter_mut() {
            child.rebind(context);
        }
    }

    fn set_value(&mut self, name: &str, value: PropertyValue) {
        let Some(fragment) = self.schema.property(name) else {
            self.context.notice(
                NoticeCode::UndeclaredProperty,
                &format!("The property {} is not defined in the JSON schema.", name),
            );
            return;
        };

        let factory = self.context.factory();
        let schema_path = self.schema_path.as_deref();
        let child = self
            .properties
            .get_or_insert_with(name, || factory.create(fragment, schema_path));

        match (child, value) {
            (Property::Component(target), PropertyValue::Data(Value::Object(fields))) => {
                for (field, field_value) in fields {
                    target.set(&field, field_value);
                }
            }
            (Property::Composite(list), PropertyValue::Data(Value::Array(items))) => {
                for item in items {
                    list.push(item);
                }
            }
            (Property::Composite(list), PropertyValue::Node(Property::Composite(other))) => {
                for item in other.into_items() {
                    list.push(item);
                }
            }
            (Property::Component(target), PropertyValue::Node(Property::Component(other))) => {
                for (field, node) in other.properties {
                    target.set(&field, node);
                }
            }
            (child, value) => {
                child.set(name, value);
            }
        }
    }

    /// Add `name` and `template` when the values do not carry them
    fn prepare_template_variables(&self, variables: &mut Map<String, Value>) {
        let missing = |key: &str| variables.get(key).map_or(true, Value::is_null);

        let needs_name = missing("name");
        let needs_template = missing("template");

        if needs_name {
            if let Some(name) = &self.schema_name {
                variables.insert("name".to_string(), Value::String(name.clone()));
            }
        }

        if needs_template {
            if let Some(theme) = self.theme() {
                variables.insert("template".to_string(), Value::String(theme));
            }
        }
    }
}

impl PropertyNode for Component {
    /// With no name, every child. With a name, the child's own value, or
    /// the child itself when it is another component.
    fn get(&self, name: Option<&str>) -> Option<PropertyView<'_>> {
        let Some(name) = name else {
            return Some(PropertyView::Properties(&self.properties));
        };

        let child = self.properties.get(name)?;
        if matches!(child, Property::Component(_)) {
            Some(PropertyView::Node(child))
        } else {
            child.get(None)
        }
    }

    /// Write a declared property, creating its node on first use
    ///
    /// A mapping is merged field by field into the child. Undeclared names
    /// are logged and ignored.
    fn set<V: Into<PropertyValue>>(&mut self, name: &str, value: V) -> &mut Self {
        self.set_value(name, value.into());
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

    fn label(&self) -> String {
        self.schema_name
            .clone()
            .or_else(|| self.schema_path.clone())
            .unwrap_or_default()
    }

    fn values(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|(name, child)| (name.to_string(), child.values()))
                .collect(),
        )
    }

    fn prepare_render(&self) -> Value {
        let mut variables: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, child)| (name.to_string(), child.prepare_render()))
            .collect();

        self.prepare_template_variables(&mut variables);
        Value::Object(variables)
    }

    /// Render through the template engine
    ///
    /// In developer mode the values are validated first. Without a
    /// `template` variable nothing is rendered and `null` is returned.
    fn render(&self) -> Value {
        if self.context.developer_mode() {
            let _ = self.validate(self.context.notify_validation());
        }

        let variables = self.prepare_render();
        let template = variables
            .get("template")
            .and_then(Value::as_str)
            .filter(|template| !template.is_empty());

        let Some(template) = template else {
            self.context.notice(
                NoticeCode::MissingTemplate,
                &format!("Cannot render: Missing template property in schema {}.", self.label()),
            );
            return Value::Null;
        };

        match self.context.templates().render(template, &variables) {
            Ok(output) => Value::String(output),
            Err(err) => {
                self.context.error(
                    NoticeCode::RenderFailed,
                    &format!("Cannot render {} with {}: {}", self.label(), template, err),
                );
                Value::Null
            }
        }
    }
}
