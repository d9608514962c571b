//! Property trees
//!
//! A schema becomes a tree of three node variants:
//!
//! - [`LeafProperty`] holds one scalar value
//! - [`Component`] holds named children, one per declared property
//! - [`CompositeComponent`] holds an append-only list of items
//!
//! All three implement [`PropertyNode`]; [`Property`] is the closed set the
//! factory hands out.

mod component;
mod composite;
mod leaf;

pub use component::Component;
pub use composite::CompositeComponent;
pub use leaf::LeafProperty;

use serde_json::Value;
use std::sync::Arc;

use crate::context::Context;
use crate::inspect::{is_empty_value, is_empty_view};
use crate::logging::NoticeCode;
use crate::schema::{SchemaKind, SchemaNode};
use crate::validation::{ErrorRecord, Validation};

// =============================================================================
// Node capability
// =============================================================================

/// The operations every node supports
pub trait PropertyNode {
    /// Read a value. `name` selects a child on keyed nodes and is ignored
    /// by leaves and lists. `None` means undefined.
    fn get(&self, name: Option<&str>) -> Option<PropertyView<'_>>;

    /// Write a value and return the node for chaining
    ///
    /// Never fails: writes the schema does not allow are logged and dropped.
    fn set<V: Into<PropertyValue>>(&mut self, name: &str, value: V) -> &mut Self;

    /// The schema fragment this node was built from
    fn schema(&self) -> &SchemaNode;

    /// The collaborators this node reports to
    fn context(&self) -> &Arc<Context>;

    /// Location of the document that declared the schema
    fn schema_path(&self) -> Option<&str>;

    /// Plain-data snapshot of the current values
    fn values(&self) -> Value;

    /// Plain data ready to hand to a template
    fn prepare_render(&self) -> Value;

    /// Final output
    fn render(&self) -> Value;

    /// Name used when logging about this node
    fn label(&self) -> String {
        self.schema_path().unwrap_or_default().to_string()
    }

    /// Whether the value read by `get(name)` is empty
    fn is_empty(&self, name: Option<&str>) -> bool {
        is_empty_view(self.get(name))
    }

    /// Check the current values against the schema
    ///
    /// References are expanded on a copy of the schema first. With
    /// `notify`, every error is also logged.
    fn validate(&self, notify: bool) -> Validation {
        let context = self.context();
        let mut schema = self.schema().clone();
        if let Err(err) = context.resolver().resolve(&mut schema, self.schema_path()) {
            context.error(
                NoticeCode::ResolveFailed,
                &format!("Could not expand schema \"{}\": {}", self.label(), err),
            );
        }

        let values = self.values();
        if values.is_null() {
            return Ok(());
        }

        let outcome = context.validator().check(&values, schema.as_value());
        if outcome.is_valid() {
            return Ok(());
        }

        let mut errors = outcome.into_errors();
        if errors.is_empty() {
            errors.push(ErrorRecord::schema_failure(self.schema_path()));
        }

        if notify {
            for error in &errors {
                context.notice(
                    NoticeCode::SchemaValidation,
                    &format!("Schema Validation: {} in schema \"{}\"", error, self.label()),
                );
            }
        }

        Err(errors)
    }
}

// =============================================================================
// Values written into and read out of nodes
// =============================================================================

/// Something that can be written into a node
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Plain data
    Data(Value),
    /// A live node
    Node(Property),
}

impl PropertyValue {
    /// The value as plain data; live nodes are snapshotted
    pub fn into_data(self) -> Value {
        match self {
            Self::Data(value) => value,
            Self::Node(node) => node.values(),
        }
    }

    pub fn as_node(&self) -> Option<&Property> {
        match self {
            Self::Node(node) => Some(node),
            Self::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Data(value) => is_empty_value(value),
            Self::Node(node) => node.is_empty(None),
        }
    }

    pub fn values(&self) -> Value {
        match self {
            Self::Data(value) => value.clone(),
            Self::Node(node) => node.values(),
        }
    }

    pub fn prepare_render(&self) -> Value {
        match self {
            Self::Data(value) => value.clone(),
            Self::Node(node) => node.prepare_render(),
        }
    }

    fn rebind(&mut self, context: &Arc<Context>) {
        if let Self::Node(node) = self {
            node.rebind(context);
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<Property> for PropertyValue {
    fn from(node: Property) -> Self {
        Self::Node(node)
    }
}

impl From<Component> for PropertyValue {
    fn from(node: Component) -> Self {
        Self::Node(Property::Component(node))
    }
}

impl From<CompositeComponent> for PropertyValue {
    fn from(node: CompositeComponent) -> Self {
        Self::Node(Property::Composite(node))
    }
}

impl From<LeafProperty> for PropertyValue {
    fn from(node: LeafProperty) -> Self {
        Self::Node(Property::Leaf(node))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Data(Value::from(value))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Data(Value::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Data(Value::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Data(Value::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Data(Value::from(value))
    }
}

/// A borrowed result of [`PropertyNode::get`]
#[derive(Debug, Clone, Copy)]
pub enum PropertyView<'a> {
    /// A leaf's value
    Value(&'a Value),
    /// Every child of a keyed node
    Properties(&'a Properties),
    /// Every item of a list
    Items(&'a [PropertyValue]),
    /// A keyed child of a keyed node, returned whole
    Node(&'a Property),
}

impl<'a> PropertyView<'a> {
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_node(&self) -> Option<&'a Property> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_properties(&self) -> Option<&'a Properties> {
        match self {
            Self::Properties(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&'a [PropertyValue]> {
        match self {
            Self::Items(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        is_empty_view(Some(*self))
    }

    /// Plain-data snapshot of what is viewed
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => (*value).clone(),
            Self::Node(node) => node.values(),
            Self::Properties(properties) => Value::Object(
                properties
                    .iter()
                    .map(|(name, child)| (name.to_string(), child.values()))
                    .collect(),
            ),
            Self::Items(items) => Value::Array(items.iter().map(PropertyValue::values).collect()),
        }
    }
}

// =============================================================================
// Ordered children of a keyed node
// =============================================================================

/// Children of a [`Component`], in insertion order
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, Property)>,
}

impl Properties {
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Property> {
        self.entries.iter_mut().map(|(_, node)| node)
    }

    fn insert(&mut self, name: &str, node: Property) {
        match self.get_mut(name) {
            Some(existing) => *existing = node,
            None => self.entries.push((name.to_string(), node)),
        }
    }

    fn get_or_insert_with(&mut self, name: &str, create: impl FnOnce() -> Property) -> &mut Property {
        let index = match self.entries.iter().position(|(key, _)| key == name) {
            Some(index) => index,
            None => {
                self.entries.push((name.to_string(), create()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

impl IntoIterator for Properties {
    type Item = (String, Property);
    type IntoIter = std::vec::IntoIter<(String, Property)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// The closed set of node variants
// =============================================================================

/// Any node of a property tree
#[derive(Debug, Clone)]
pub enum Property {
    Leaf(LeafProperty),
    Component(Component),
    Composite(CompositeComponent),
}

impl Property {
    /// The variant as a schema kind
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Leaf(_) => SchemaKind::Leaf,
            Self::Component(_) => SchemaKind::Object,
            Self::Composite(_) => SchemaKind::Array,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafProperty> {
        match self {
            Self::Leaf(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Self::Component(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_component_mut(&mut self) -> Option<&mut Component> {
        match self {
            Self::Component(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeComponent> {
        match self {
            Self::Composite(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut CompositeComponent> {
        match self {
            Self::Composite(node) => Some(node),
            _ => None,
        }
    }

    /// Point this node and everything below it at `context`
    pub fn rebind(&mut self, context: &Arc<Context>) {
        match self {
            Self::Leaf(node) => node.rebind(context),
            Self::Component(node) => node.rebind(context),
            Self::Composite(node) => node.rebind(context),
        }
    }
}

impl PropertyNode for Property {
    fn get(&self, name: Option<&str>) -> Option<PropertyView<'_>> {
        match self {
            Self::Leaf(node) => node.get(name),
            Self::Component(node) => node.get(name),
            Self::Composite(node) => node.get(name),
        }
    }

    fn set<V: Into<PropertyValue>>(&mut self, name: &str, value: V) -> &mut Self {
        match self {
            Self::Leaf(node) => {
                node.set(name, value);
            }
            Self::Component(node) => {
                node.set(name, value);
            }
            Self::Composite(node) => {
                node.set(name, value);
            }
        }
        self
    }

    fn schema(&self) -> &SchemaNode {
        match self {
            Self::Leaf(node) => node.schema(),
            Self::Component(node) => node.schema(),
            Self::Composite(node) => node.schema(),
        }
    }

    fn context(&self) -> &Arc<Context> {
        match self {
            Self::Leaf(node) => node.context(),
            Self::Component(node) => node.context(),
            Self::Composite(node) => node.context(),
        }
    }

    fn schema_path(&self) -> Option<&str> {
        match self {
            Self::Leaf(node) => node.schema_path(),
            Self::Component(node) => node.schema_path(),
            Self::Composite(node) => node.schema_path(),
        }
    }

    fn values(&self) -> Value {
        match self {
            Self::Leaf(node) => node.values(),
            Self::Component(node) => node.values(),
            Self::Composite(node) => node.values(),
        }
    }

    fn prepare_render(&self) -> Value {
        match self {
            Self::Leaf(node) => node.prepare_render(),
            Self::Component(node) => node.prepare_render(),
            Self::Composite(node) => node.prepare_render(),
        }
    }

    fn render(&self) -> Value {
        match self {
            Self::Leaf(node) => node.render(),
            Self::Component(node) => node.render(),
            Self::Composite(node) => node.render(),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Leaf(node) => node.label(),
            Self::Component(node) => node.label(),
            Self::Composite(node) => node.label(),
        }
    }

    fn validate(&self, notify: bool) -> Validation {
        match self {
            Self::Leaf(node) => node.validate(notify),
            Self::Component(node) => node.validate(notify),
            Self::Composite(node) => node.validate(notify),
        }
    }
}
