//! Service schemas: the registration surface the code generator targets.
//!
//! The Corridor code generator emits one [`ServiceSchema`] per service — a
//! list of operation names with their route templates. At startup the
//! schema is compiled into a [`PatternTree`] keyed by [`OperationShape`];
//! any malformed or conflicting template aborts compilation, so a service
//! with a bad definition never starts accepting traffic.

use corridor_router::{PatternError, PatternTree, UriPattern};

/// One operation's registration: its name and route template.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperationShape {
    /// The operation name, e.g. `GetWidget`.
    pub name: String,
    /// The route template, e.g. `widgets/{id}` or `r?Action=Get`.
    pub route: String,
}

/// A service definition: name plus registered operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ServiceSchema {
    /// The service name, e.g. `WidgetRegistry`.
    pub name: String,
    /// The operations this service exposes.
    pub operations: Vec<OperationShape>,
}

/// A schema that failed to compile: the offending operation and the
/// underlying pattern error.
#[derive(Debug, thiserror::Error)]
#[error("invalid route `{route}` for operation {operation}: {source}")]
pub struct SchemaError {
    /// The operation whose route failed.
    pub operation: String,
    /// The raw route template.
    pub route: String,
    /// The underlying pattern failure.
    #[source]
    pub source: PatternError,
}

impl ServiceSchema {
    /// Create an empty schema with the given service name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Append one operation registration.
    #[must_use]
    pub fn operation(mut self, name: impl Into<String>, route: impl Into<String>) -> Self {
        self.operations.push(OperationShape {
            name: name.into(),
            route: route.into(),
        });
        self
    }

    /// Compile the schema into a pattern tree.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for the first operation whose template
    /// fails to parse or conflicts with an earlier registration.
    pub fn compile(&self) -> Result<PatternTree<OperationShape>, SchemaError> {
        let mut tree = PatternTree::new();

        for shape in &self.operations {
            let fail = |source| SchemaError {
                operation: shape.name.clone(),
                route: shape.route.clone(),
                source,
            };
            let pattern = UriPattern::parse(&shape.route).map_err(fail)?;
            tree.insert(pattern, shape.clone()).map_err(fail)?;
        }

        tracing::debug!(
            service = %self.name,
            operations = tree.len(),
            "compiled service schema"
        );
        Ok(tree)
    }
}
