use super::pattern::PathPattern;
use crate::error::AppResult;
use serde::Serialize;

/// Whether a route may be visited without a session.
///
/// Every route definition states this explicitly, there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRequirement {
    Required,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub requires_auth: AuthRequirement,
}

impl RouteMeta {
    pub fn requires_auth(&self) -> bool {
        self.requires_auth == AuthRequirement::Required
    }
}

/// A navigation target or source: the concrete path plus the metadata of
/// the route definition it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, requires_auth: AuthRequirement) -> Self {
        Self {
            path: path.into(),
            meta: RouteMeta { requires_auth },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub pattern: PathPattern,
    pub meta: RouteMeta,
}

/// Ordered route definitions. The first matching definition wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, requires_auth: AuthRequirement) -> AppResult<Self> {
        self.routes.push(RouteDefinition {
            pattern: PathPattern::new(pattern)?,
            meta: RouteMeta { requires_auth },
        });
        Ok(self)
    }

    /// Add a route that matches `path` exactly, with no pattern syntax.
    pub fn exact(mut self, path: &str, requires_auth: AuthRequirement) -> AppResult<Self> {
        self.routes.push(RouteDefinition {
            pattern: PathPattern::literal(path)?,
            meta: RouteMeta { requires_auth },
        });
        Ok(self)
    }

    pub fn resolve(&self, path: &str) -> Option<RouteDescriptor> {
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .map(|route| RouteDescriptor {
                path: path.to_string(),
                meta: route.meta,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter()
    }
}
