//! Pattern Schemas
//!
//! Schema-driven property trees for rendering UI patterns.
//!
//! A JSON Schema document describes a pattern. Loading it through the
//! [`Catalog`] yields a [`Component`]: a tree of typed nodes that accepts
//! values, checks them against the schema and renders them through a
//! template engine.
//!
//! ## Features
//!
//! - **Typed nodes**: leaves, keyed components and append-only lists, picked
//!   from the schema `type`
//! - **Defaults**: schema defaults and single-member enums are filled in on
//!   construction; readonly properties keep them
//! - **Validation**: JSON Schema (draft 7) checks with structured error records
//! - **Rendering**: Handlebars templates, with `name` and `template` supplied
//!   from the schema name
//! - **Prototype cache**: each schema is built once; every load returns an
//!   independent copy
//!
//! ## Architecture
//!
//! ```text
//! Catalog ──load──▶ Component ──set/get──▶ Properties
//!    │                  │                     ├── LeafProperty
//!    │                  │                     ├── Component
//!    │                  │                     └── CompositeComponent
//!    │                  └──render──▶ TemplateEngine
//!    └── Context (Logger, TemplateEngine, Resolver, Validator)
//! ```

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod inspect;
pub mod logging;
pub mod property;
pub mod resolver;
pub mod schema;
pub mod template;
pub mod validation;

pub use catalog::Catalog;
pub use config::Settings;
pub use context::{Context, ContextBuilder};
pub use error::{PatternError, Result};
pub use factory::NodeFactory;
pub use logging::{Level, LogEntry, Logger, MemoryLogger, NoticeCode, TracingLogger};
pub use property::{
    Component, CompositeComponent, LeafProperty, Properties, Property, PropertyNode, PropertyValue,
    PropertyView,
};
pub use resolver::{NoopResolver, Resolver};
pub use schema::{SchemaKind, SchemaNode};
pub use template::{HandlebarsEngine, TemplateEngine};
pub use validation::{ErrorRecord, JsonSchemaValidator, Validation, ValidationOutcome, Validator};
