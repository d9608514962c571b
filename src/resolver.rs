//! Reference resolution contract
//!
//! Expanding `$ref` pointers is left to the embedding application. The
//! factory and the validation pipeline only rely on this call contract.

use crate::error::Result;
use crate::schema::SchemaNode;

/// Expands references inside a schema fragment, in place
///
/// `base_path` is the location of the document that declared the fragment,
/// so relative references resolve against the right file. Resolving an
/// already-resolved fragment must be a no-op.
pub trait Resolver: Send + Sync {
    fn resolve(&self, schema: &mut SchemaNode, base_path: Option<&str>) -> Result<()>;
}

/// Leaves every fragment untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl Resolver for NoopResolver {
    fn resolve(&self, _schema: &mut SchemaNode, _base_path: Option<&str>) -> Result<()> {
        Ok(())
    }
}
