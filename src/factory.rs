//! Node factory
//!
//! Picks the property variant for a schema fragment. Each tree's context
//! hands out its own factory, so two trees built with different
//! collaborators never share one.

use std::sync::Arc;

use crate::context::Context;
use crate::logging::NoticeCode;
use crate::property::{Component, CompositeComponent, LeafProperty, Property};
use crate::schema::{SchemaKind, SchemaNode};

/// Builds property nodes bound to one context
#[derive(Debug, Clone)]
pub struct NodeFactory {
    context: Arc<Context>,
}

impl NodeFactory {
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Create the node for `fragment`
    ///
    /// A `$ref` is expanded first, relative to `base_path`, so the kind is
    /// read from the referenced schema. A failed expansion is logged and
    /// the fragment is used as-is.
    pub fn create(&self, mut fragment: SchemaNode, base_path: Option<&str>) -> Property {
        if let Some(reference) = fragment.reference().map(str::to_string) {
            if let Err(err) = self.context.resolver().resolve(&mut fragment, base_path) {
                self.context.error(
                    NoticeCode::ResolveFailed,
                    &format!("Could not resolve {}: {}", reference, err),
                );
            }
        }

        let context = Arc::clone(&self.context);
        let schema = Arc::new(fragment);
        match schema.kind() {
            SchemaKind::Array => Property::Composite(CompositeComponent::new(schema, context, base_path)),
            SchemaKind::Object => Property::Component(Component::new(schema, context, None, base_path)),
            SchemaKind::Leaf => Property::Leaf(LeafProperty::new(schema, context, base_path)),
        }
    }
}
