//! Per-route schema lookup.
//!
//! Schemas are built once at startup and shared read-only. Each route
//! registers at most one schema, together with the part of the request it
//! applies to.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;

use crate::validation::schema::{Field, Schema};

/// Part of the request a schema validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Query,
    Body,
}

impl Source {
    /// Name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Query => "query",
            Source::Body => "body",
        }
    }
}

/// A schema bound to the request source it checks.
#[derive(Debug, Clone)]
pub struct RouteSchema {
    pub source: Source,
    pub schema: Arc<Schema>,
}

/// Query parameters accepted by `GET /ping`.
pub fn ping_query_schema() -> Schema {
    Schema::new("ping.query")
        .field(Field::optional("name").string().non_empty("Name must not be empty"))
        .field(Field::optional("delay").string().parse_integer().positive())
}

/// JSON body accepted by `POST /ping`.
pub fn ping_body_schema() -> Schema {
    Schema::new("ping.body")
        .field(Field::optional("message").string().non_empty("Message must not be empty"))
}

/// Route to schema table, keyed by path then method.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    routes: HashMap<&'static str, HashMap<Method, RouteSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every schema the service's routes use.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Method::GET, "/ping", Source::Query, ping_query_schema());
        registry.register(Method::POST, "/ping", Source::Body, ping_body_schema());
        registry
    }

    /// Bind `schema` to a route, replacing any earlier registration.
    pub fn register(&mut self, method: Method, path: &'static str, source: Source, schema: Schema) {
        let entry = RouteSchema { source, schema: Arc::new(schema) };
        if let Some(previous) = self.routes.entry(path).or_default().insert(method.clone(), entry) {
            tracing::warn!(
                method = %method,
                path,
                schema = previous.schema.name(),
                "Replacing registered schema"
            );
        }
    }

    /// Schema registered for `method` on `path`, if any.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteSchema> {
        self.routes.get(path)?.get(method)
    }

    /// Number of registered route schemas.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// Whether no route has a schema.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
